//! Backend selection
//!
//! Chooses between the remote managed backend and the local one. The remote
//! choice is never validated here: its credentials and region are resolved by
//! the AWS SDK later. The local choice is checked for structural problems
//! only; whether the host is actually reachable is found out on the first
//! exchange.

use super::handle::{BackendHandle, LocalModelConfig, RemoteModelConfig};
use crate::core::error::BackendInitError;

/// Produces the [`BackendHandle`] for a run
#[derive(Debug, Clone)]
pub struct BackendSelector {
    remote: RemoteModelConfig,
}

impl BackendSelector {
    pub fn new(remote: RemoteModelConfig) -> Self {
        Self { remote }
    }

    /// Pick a backend. Never falls back from one kind to the other.
    pub fn select(
        &self,
        use_local: bool,
        local: LocalModelConfig,
    ) -> Result<BackendHandle, BackendInitError> {
        if !use_local {
            return Ok(BackendHandle::Remote(self.remote.clone()));
        }

        validate_local(&local)?;
        Ok(BackendHandle::Local(local))
    }
}

fn validate_local(config: &LocalModelConfig) -> Result<(), BackendInitError> {
    let host = config.host.trim();
    if host.is_empty() {
        return Err(BackendInitError::local("host cannot be empty"));
    }
    if !(host.starts_with("http://") || host.starts_with("https://")) {
        return Err(BackendInitError::local(format!(
            "host must start with http:// or https:// (got {host})"
        )));
    }
    if config.model_id.trim().is_empty() {
        return Err(BackendInitError::local("model_id cannot be empty"));
    }
    if config.max_tokens == 0 {
        return Err(BackendInitError::local("max_tokens must be greater than 0"));
    }
    if !config.temperature.is_finite() || !(0.0..=2.0).contains(&config.temperature) {
        return Err(BackendInitError::local(format!(
            "temperature must be between 0.0 and 2.0 (got {})",
            config.temperature
        )));
    }
    if config.keep_alive.trim().is_empty() {
        return Err(BackendInitError::local("keep_alive cannot be empty"));
    }
    Ok(())
}
