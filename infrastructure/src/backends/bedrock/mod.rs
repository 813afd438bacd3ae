//! AWS Bedrock backend (Converse API)

mod model;
mod types;

pub use model::BedrockChatModel;
