//! Reasoning backend adapters

pub mod bedrock;
pub mod ollama;

use advisor_application::ChatModel;
use advisor_domain::{BackendHandle, BackendInitError};
use std::sync::Arc;

pub use bedrock::BedrockChatModel;
pub use ollama::OllamaChatModel;

/// Construct the chat model for a selected backend
pub async fn create_chat_model(
    handle: &BackendHandle,
) -> Result<Arc<dyn ChatModel>, BackendInitError> {
    Ok(match handle {
        BackendHandle::Remote(config) => Arc::new(BedrockChatModel::new(config.clone()).await?),
        BackendHandle::Local(config) => Arc::new(OllamaChatModel::new(config.clone())?),
    })
}
