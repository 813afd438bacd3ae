//! Application layer for aws-advisor
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    chat_model::{BackendError, ChatModel},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{AcquireProgress, ConsultProgress, NoAcquireProgress, NoConsultProgress},
    provider::{
        CapabilityInvoker, ProviderConnection, ProviderError, ProviderLauncher, ToolOutput,
    },
    transcript_store::{TranscriptError, TranscriptStore},
};
pub use use_cases::aggregate::{AggregationError, CapabilityAggregator, CapabilityScope};
pub use use_cases::consult::{Consult, ConsultantSession, ERROR_MARKER};
pub use use_cases::provider_session::{ProviderSession, SessionState};
pub use use_cases::recorder::ConversationRecorder;
pub use use_cases::tool_loop::{
    DEFAULT_MAX_TOOL_ROUNDS, ToolLoopError, ToolStats, ToolUseRuntime, UsageSummary,
};
