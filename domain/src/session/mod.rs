//! Chat message model shared by every reasoning backend.
//!
//! - [`message::Message`] — one turn of the conversation history
//! - [`message::ContentBlock`] — text, tool use request, or tool result
//! - [`message::ModelReply`] — what a backend returns for one request

pub mod message;
