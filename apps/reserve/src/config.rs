use std::{fs, io, path::Path, time::Duration};

use anyhow::Context;
use booking_core::{AckMode, ControllerConfig, Endpoint, UNCONFIGURED_ENDPOINT};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint_url: String,
    pub ack_mode: AckMode,
    pub success_clear_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint_url: UNCONFIGURED_ENDPOINT.into(),
            ack_mode: AckMode::Opaque,
            success_clear_seconds: 5,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    endpoint_url: Option<String>,
    ack_mode: Option<AckMode>,
    success_clear_seconds: Option<u64>,
}

impl Settings {
    pub fn controller_config(&self) -> anyhow::Result<ControllerConfig> {
        let endpoint = Endpoint::parse(&self.endpoint_url)
            .with_context(|| format!("invalid endpoint_url '{}'", self.endpoint_url))?;
        Ok(ControllerConfig::new(endpoint)
            .with_ack_mode(self.ack_mode)
            .with_success_clear_after(Duration::from_secs(self.success_clear_seconds)))
    }
}

/// Defaults, then `path` if it exists, then environment overrides.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();
    apply_file(&mut settings, path)?;
    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, path: &Path) -> anyhow::Result<()> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };

    let file_cfg: FileSettings =
        toml::from_str(&raw).with_context(|| format!("failed to parse '{}'", path.display()))?;
    if let Some(v) = file_cfg.endpoint_url {
        settings.endpoint_url = v;
    }
    if let Some(v) = file_cfg.ack_mode {
        settings.ack_mode = v;
    }
    if let Some(v) = file_cfg.success_clear_seconds {
        settings.success_clear_seconds = v;
    }
    Ok(())
}

fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("RESERVE_ENDPOINT_URL") {
        settings.endpoint_url = v;
    }
    if let Some(v) = lookup("APP__ENDPOINT_URL") {
        settings.endpoint_url = v;
    }

    if let Some(v) = lookup("APP__ACK_MODE") {
        settings.ack_mode = v
            .parse()
            .context("invalid APP__ACK_MODE")?;
    }

    if let Some(v) = lookup("APP__SUCCESS_CLEAR_SECONDS") {
        settings.success_clear_seconds = v
            .trim()
            .parse()
            .with_context(|| format!("invalid APP__SUCCESS_CLEAR_SECONDS '{v}'"))?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
