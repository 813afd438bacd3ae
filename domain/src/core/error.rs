//! Domain error types

use thiserror::Error;

/// Invalid input to the consultant session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("system_prompt cannot be empty")]
    EmptySystemPrompt,

    #[error("request cannot be empty")]
    EmptyRequest,
}

/// The selected backend could not be constructed
///
/// Only structural problems are reported here. An unreachable host is
/// discovered on the first exchange and surfaces as a consult error instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to initialize {backend} backend: {reason}")]
pub struct BackendInitError {
    pub backend: &'static str,
    pub reason: String,
}

impl BackendInitError {
    pub fn local(reason: impl Into<String>) -> Self {
        Self {
            backend: "local",
            reason: reason.into(),
        }
    }

    pub fn remote(reason: impl Into<String>) -> Self {
        Self {
            backend: "remote",
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::EmptySystemPrompt.to_string(),
            "system_prompt cannot be empty"
        );
        assert_eq!(ConfigError::EmptyRequest.to_string(), "request cannot be empty");
    }

    #[test]
    fn test_backend_init_error_names_backend() {
        let err = BackendInitError::local("model_id cannot be empty");
        assert_eq!(
            err.to_string(),
            "Failed to initialize local backend: model_id cannot be empty"
        );
        assert_eq!(BackendInitError::remote("x").backend, "remote");
    }
}
