//! Conversation log and its plain-text transcript.

pub mod log;
pub mod transcript;
