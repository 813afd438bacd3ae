//! Infrastructure layer for aws-advisor
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: MCP provider processes, the Bedrock and
//! Ollama backends, configuration file loading and file output.

pub mod backends;
pub mod config;
pub mod logging;
pub mod mcp;
pub mod transcript;

// Re-export commonly used types
pub use backends::{BedrockChatModel, OllamaChatModel, create_chat_model};
pub use config::{
    ConfigLoadError, ConfigLoader, ConfigValidationError, FileAgentConfig, FileBedrockConfig,
    FileConfig, FileLocalConfig, FileOutputConfig, FileProviderConfig, FileReplConfig,
};
pub use logging::JsonlConversationLogger;
pub use mcp::{McpConnection, McpLauncher};
pub use transcript::FileTranscriptStore;
