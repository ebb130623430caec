use std::{str::FromStr, time::Duration};

use serde::Deserialize;
use shared::domain::DEFAULT_BOOKING_HORIZON_DAYS;
use thiserror::Error;
use url::Url;

/// Placeholder left in a fresh deployment until an operator sets the real URL.
pub const UNCONFIGURED_ENDPOINT: &str = "YOUR_APPS_SCRIPT_WEB_APP_URL_HERE";

pub const DEFAULT_SUCCESS_CLEAR_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid endpoint url '{raw}': {source}")]
    InvalidUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("endpoint url '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("unknown acknowledgement mode '{0}' (expected 'opaque' or 'readable')")]
    UnknownAckMode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Unconfigured,
    Configured(Url),
}

impl Endpoint {
    pub fn parse(raw: &str) -> Result<Self, EndpointError> {
        let raw = raw.trim();
        if raw.is_empty() || raw == UNCONFIGURED_ENDPOINT {
            return Ok(Self::Unconfigured);
        }

        let url = Url::parse(raw).map_err(|source| EndpointError::InvalidUrl {
            raw: raw.to_string(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(EndpointError::UnsupportedScheme(raw.to_string()));
        }

        Ok(Self::Configured(url))
    }

    pub fn url(&self) -> Option<&Url> {
        match self {
            Self::Configured(url) => Some(url),
            Self::Unconfigured => None,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }
}

/// How much the endpoint tells us back.
///
/// `Opaque` mirrors a cross-origin no-cors POST: the reply is never read and
/// any completed request counts as delivered, so remote persistence is not
/// actually confirmed. `Readable` expects an [`shared::protocol::AckResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AckMode {
    #[default]
    Opaque,
    Readable,
}

impl FromStr for AckMode {
    type Err = EndpointError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "opaque" => Ok(Self::Opaque),
            "readable" => Ok(Self::Readable),
            other => Err(EndpointError::UnknownAckMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub endpoint: Endpoint,
    pub ack_mode: AckMode,
    pub success_clear_after: Duration,
    pub booking_horizon_days: u64,
}

impl ControllerConfig {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            ack_mode: AckMode::default(),
            success_clear_after: DEFAULT_SUCCESS_CLEAR_AFTER,
            booking_horizon_days: DEFAULT_BOOKING_HORIZON_DAYS,
        }
    }

    pub fn with_ack_mode(mut self, ack_mode: AckMode) -> Self {
        self.ack_mode = ack_mode;
        self
    }

    pub fn with_success_clear_after(mut self, delay: Duration) -> Self {
        self.success_clear_after = delay;
        self
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new(Endpoint::Unconfigured)
    }
}
