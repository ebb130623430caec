use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::ReservationRequest,
    protocol::{AckResponse, DeliveryReceipt},
};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::endpoint::AckMode;

const UNKNOWN_REJECTION: &str = "unknown error";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed")]
    Send {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read acknowledgement from {url}")]
    Read {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    /// Failure from a transport other than [`HttpTransport`], such as a
    /// queue or mock endpoint plugged in behind [`ReservationTransport`].
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Outbound leg of a reservation. One call, no retry, no cancellation.
#[async_trait]
pub trait ReservationTransport: Send + Sync {
    async fn deliver(
        &self,
        url: &Url,
        request: &ReservationRequest,
        ack_mode: AckMode,
    ) -> Result<DeliveryReceipt, TransportError>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationTransport for HttpTransport {
    async fn deliver(
        &self,
        url: &Url,
        request: &ReservationRequest,
        ack_mode: AckMode,
    ) -> Result<DeliveryReceipt, TransportError> {
        let response = self
            .http
            .post(url.clone())
            .json(request)
            .send()
            .await
            .map_err(|source| TransportError::Send {
                url: url.clone(),
                source,
            })?;

        match ack_mode {
            AckMode::Opaque => {
                debug!(%url, "reservation sent; reply left unread");
                Ok(DeliveryReceipt::Assumed)
            }
            AckMode::Readable => {
                let status = response.status();
                let body = response.text().await.map_err(|source| TransportError::Read {
                    url: url.clone(),
                    source,
                })?;
                let receipt = read_acknowledgement(status, &body);
                info!(%url, %status, ?receipt, "reservation acknowledged");
                Ok(receipt)
            }
        }
    }
}

fn read_acknowledgement(status: reqwest::StatusCode, body: &str) -> DeliveryReceipt {
    match serde_json::from_str::<AckResponse>(body) {
        Ok(ack) if ack.success && status.is_success() => DeliveryReceipt::Confirmed,
        Ok(ack) => DeliveryReceipt::Rejected(
            ack.message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_REJECTION.to_string()),
        ),
        Err(_) if !status.is_success() => DeliveryReceipt::Rejected(format!("HTTP {status}")),
        Err(_) => DeliveryReceipt::Rejected(UNKNOWN_REJECTION.to_string()),
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
