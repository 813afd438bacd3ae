//! Chat model port
//!
//! Defines the interface for communicating with a reasoning backend.
//! Implementations are stateless: the full history is sent on every call.

use advisor_domain::{Capability, Message, ModelReply};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to a backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier, for logs
    fn model_id(&self) -> &str;

    /// Send the system prompt, history and tool definitions; get one reply
    async fn complete(
        &self,
        system_prompt: &str,
        messages: &[Message],
        tools: &[Capability],
    ) -> Result<ModelReply, BackendError>;
}
