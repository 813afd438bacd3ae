//! Tool provider ports
//!
//! A provider is an external MCP server running as a subprocess. The
//! application layer only sees it through these traits; the stdio transport
//! lives in the infrastructure layer.

use advisor_domain::{Capability, ProviderConfig};
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while launching or talking to a provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The executable is missing or the subprocess could not be spawned
    #[error("Failed to launch provider '{provider}': {reason}")]
    Launch { provider: String, reason: String },

    /// The subprocess is running but a protocol exchange failed
    #[error("Provider '{provider}' communication error: {reason}")]
    Communication { provider: String, reason: String },

    #[error("Provider '{provider}' is {state}, cannot {operation}")]
    InvalidState {
        provider: String,
        state: &'static str,
        operation: &'static str,
    },

    #[error("No active provider advertises capability '{0}'")]
    UnknownCapability(String),
}

impl ProviderError {
    pub fn launch(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Launch {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    pub fn communication(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Communication {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}

/// Result of one capability invocation
///
/// `is_error` is the provider's own verdict (the MCP `isError` flag); a
/// transport failure is a [`ProviderError`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Launches provider subprocesses
#[async_trait]
pub trait ProviderLauncher: Send + Sync {
    /// Spawn the provider and complete its protocol handshake
    async fn launch(
        &self,
        config: &ProviderConfig,
    ) -> Result<Box<dyn ProviderConnection>, ProviderError>;
}

/// A live connection to one provider subprocess
///
/// Dropping a connection must terminate the subprocess.
#[async_trait]
pub trait ProviderConnection: Send + Sync {
    /// One `tools/list` round trip
    async fn list_capabilities(&self) -> Result<Vec<Capability>, ProviderError>;

    /// One `tools/call` round trip
    async fn invoke(&self, name: &str, arguments: Value) -> Result<ToolOutput, ProviderError>;

    /// Terminate the subprocess. Called at most once.
    async fn shutdown(&mut self) -> Result<(), ProviderError>;
}

/// Routes a capability call to whichever provider advertised it
#[async_trait]
pub trait CapabilityInvoker: Send + Sync {
    async fn invoke(&self, name: &str, arguments: Value) -> Result<ToolOutput, ProviderError>;
}
