//! Domain layer for aws-advisor
//!
//! This crate contains the value types the advisor is built from.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Providers and capabilities
//!
//! A **provider** is an external MCP server launched as a subprocess. Each
//! provider advertises a list of **capabilities** (tools). The capabilities of
//! all providers are concatenated, in configuration order, into one
//! [`CapabilityRegistry`] that the reasoning backend is bound to.
//!
//! ## Backends
//!
//! A [`BackendHandle`] names the reasoning backend for one run: the remote
//! managed model (AWS Bedrock, default) or a locally hosted model (Ollama).
//!
//! ## Conversations
//!
//! Every exchange is appended to a [`ConversationLog`], rendered as a plain
//! text transcript when the run ends.

pub mod backend;
pub mod config;
pub mod conversation;
pub mod core;
pub mod interaction;
pub mod prompt;
pub mod provider;
pub mod session;

// Re-export commonly used types
pub use backend::{
    handle::{BackendHandle, DEFAULT_REMOTE_MODEL_ID, LocalModelConfig, RemoteModelConfig},
    selector::BackendSelector,
};
pub use config::profile::{AWS_PROFILE_ENV, DEFAULT_AWS_PROFILE, resolve_aws_profile};
pub use conversation::{
    log::{ConversationLog, Exchange},
    transcript::render_transcript,
};
pub use core::error::{BackendInitError, ConfigError};
pub use interaction::exit::{EXIT_TOKENS, is_exit_command};
pub use prompt::consultant::{CONSULTANT_SYSTEM_PROMPT, validate_system_prompt};
pub use provider::{
    capability::{Capability, CapabilityRegistry, ProviderCount, RegistryStats},
    config::ProviderConfig,
};
pub use session::message::{ContentBlock, Message, ModelReply, Role, StopReason, TokenUsage};
