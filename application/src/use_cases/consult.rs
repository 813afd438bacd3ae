//! Consultant session
//!
//! The conversational front of the advisor: validates input, hands the
//! request to the [`ToolUseRuntime`] and turns every backend failure into
//! an answer string that starts with [`ERROR_MARKER`]. Only invalid input is
//! reported as an error.

use crate::ports::chat_model::ChatModel;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::ConsultProgress;
use crate::ports::provider::CapabilityInvoker;
use crate::use_cases::tool_loop::{DEFAULT_MAX_TOOL_ROUNDS, ToolUseRuntime, UsageSummary};
use advisor_domain::{BackendHandle, CapabilityRegistry, ConfigError, validate_system_prompt};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::error;

/// Prefix of every answer produced from a backend failure
pub const ERROR_MARKER: &str = "Error processing request:";

/// Something that answers consultation requests
#[async_trait]
pub trait Consult: Send {
    /// Answer one request.
    ///
    /// Fails only for empty input. Backend failures come back as an
    /// answer starting with [`ERROR_MARKER`].
    async fn consult(&mut self, request: &str) -> Result<String, ConfigError>;
}

pub struct ConsultantSession {
    backend: BackendHandle,
    runtime: ToolUseRuntime,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl std::fmt::Debug for ConsultantSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsultantSession")
            .field("backend", &self.backend)
            .field("history", &self.runtime.history().len())
            .finish()
    }
}

impl ConsultantSession {
    /// Bind a system prompt and backend to the aggregated capabilities
    pub fn new(
        system_prompt: &str,
        backend: BackendHandle,
        model: Arc<dyn ChatModel>,
        invoker: Arc<dyn CapabilityInvoker>,
        registry: &CapabilityRegistry,
    ) -> Result<Self, ConfigError> {
        validate_system_prompt(system_prompt)?;

        let runtime = ToolUseRuntime::new(
            system_prompt,
            model,
            invoker,
            registry.capabilities().to_vec(),
        )
        .with_max_tool_rounds(DEFAULT_MAX_TOOL_ROUNDS);

        Ok(Self {
            backend,
            runtime,
            conversation_logger: Arc::new(NoConversationLogger),
        })
    }

    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.runtime = self.runtime.with_max_tool_rounds(rounds);
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.runtime = self.runtime.with_conversation_logger(logger.clone());
        self.conversation_logger = logger;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ConsultProgress>) -> Self {
        self.runtime = self.runtime.with_progress(progress);
        self
    }

    pub fn backend(&self) -> &BackendHandle {
        &self.backend
    }

    pub fn usage(&self) -> &UsageSummary {
        self.runtime.summary()
    }
}

#[async_trait]
impl Consult for ConsultantSession {
    async fn consult(&mut self, request: &str) -> Result<String, ConfigError> {
        if request.trim().is_empty() {
            return Err(ConfigError::EmptyRequest);
        }

        match self.runtime.run(request).await {
            Ok(answer) => Ok(answer),
            Err(e) => {
                error!(backend = %self.backend, error = %e, "Consultation failed");
                self.conversation_logger.log(ConversationEvent::new(
                    "consult_error",
                    serde_json::json!({ "error": e.to_string() }),
                ));
                Ok(format!("{ERROR_MARKER} {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_model::BackendError;
    use crate::use_cases::tool_loop::test_support::*;
    use advisor_domain::{Capability, LocalModelConfig};

    fn registry() -> CapabilityRegistry {
        let mut registry = CapabilityRegistry::new();
        registry.extend_from_provider(
            "documentation",
            vec![Capability::new("documentation", "search_documentation")],
        );
        registry
    }

    fn session(model: Arc<ScriptedModel>) -> ConsultantSession {
        ConsultantSession::new(
            "You are an AWS consultant.",
            BackendHandle::Local(LocalModelConfig::default()),
            model,
            Arc::new(EchoInvoker::new()),
            &registry(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_system_prompt_rejected() {
        for prompt in ["", "   ", "\n"] {
            let result = ConsultantSession::new(
                prompt,
                BackendHandle::Local(LocalModelConfig::default()),
                Arc::new(ScriptedModel::new(vec![])),
                Arc::new(EchoInvoker::new()),
                &registry(),
            );
            assert_eq!(result.unwrap_err(), ConfigError::EmptySystemPrompt);
        }
    }

    #[tokio::test]
    async fn test_consult_returns_answer() {
        let model = Arc::new(ScriptedModel::new(vec![text_reply("Use DynamoDB.")]));
        let mut session = session(model);

        let answer = session.consult("Which database?").await.unwrap();
        assert_eq!(answer, "Use DynamoDB.");
    }

    #[tokio::test]
    async fn test_empty_request_does_not_touch_backend() {
        let model = Arc::new(ScriptedModel::new(vec![text_reply("unused")]));
        let mut session = session(model.clone());

        for request in ["", "   ", "\t\n"] {
            assert_eq!(
                session.consult(request).await.unwrap_err(),
                ConfigError::EmptyRequest
            );
        }
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_error_answer() {
        let model = Arc::new(ScriptedModel::new(vec![Err(BackendError::Connection(
            "connection refused".into(),
        ))]));
        let mut session = session(model);

        let answer = session.consult("What is EC2?").await.unwrap();
        assert!(answer.starts_with(ERROR_MARKER));
        assert!(answer.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_session_recovers_after_failure() {
        let model = Arc::new(ScriptedModel::new(vec![
            Err(BackendError::RequestFailed("throttled".into())),
            text_reply("Second try works."),
        ]));
        let mut session = session(model.clone());

        let first = session.consult("q1").await.unwrap();
        assert!(first.starts_with(ERROR_MARKER));

        let second = session.consult("q2").await.unwrap();
        assert_eq!(second, "Second try works.");

        // The failed request is not replayed to the backend
        let seen = model.seen.lock().unwrap();
        assert_eq!(seen[1].len(), 1);
        assert_eq!(seen[1][0].text_content(), "q2");
    }

    #[tokio::test]
    async fn test_usage_is_tracked() {
        let model = Arc::new(ScriptedModel::new(vec![
            tool_reply("t1", "search_documentation"),
            text_reply("done"),
        ]));
        let mut session = session(model);
        session.consult("q").await.unwrap();

        assert_eq!(session.usage().requests, 2);
        assert_eq!(session.usage().total_tool_calls(), 1);
        assert!(session.backend().is_local());
    }
}
