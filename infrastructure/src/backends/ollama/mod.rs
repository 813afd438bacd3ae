//! Local Ollama backend (`/api/chat`, non-streaming)

mod model;
mod types;

pub use model::OllamaChatModel;
