//! Tool-use runtime
//!
//! Owns the multi-turn conversation history and drives the tool-use loop
//! for one request:
//!
//! ```text
//! history += user(request)
//! loop {
//!     reply = model.complete(system, history, capabilities)
//!     history += assistant(reply)
//!     if reply is not tool use: break
//!     results = invoke each requested capability
//!     history += user(results)
//! }
//! ```
//!
//! A failed exchange leaves the history as it was before the request, so
//! user and assistant turns always alternate and every tool use is answered.

use crate::ports::chat_model::{BackendError, ChatModel};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{ConsultProgress, NoConsultProgress};
use crate::ports::provider::CapabilityInvoker;
use crate::use_cases::tool_helpers::{tool_args_preview, truncate_preview};
use advisor_domain::{Capability, ContentBlock, Message, StopReason, TokenUsage};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default bound on tool rounds per request
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 20;

#[derive(Error, Debug)]
pub enum ToolLoopError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Tool use exceeded {0} rounds without a final answer")]
    TooManyRounds(usize),

    #[error("No response from model")]
    EmptyResponse,

    #[error("Model stopped ({0:?}) before finishing its tool call")]
    IncompleteToolUse(StopReason),
}

/// Call counts for one capability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolStats {
    pub calls: u32,
    pub successes: u32,
    pub errors: u32,
}

/// Token and tool usage accumulated over a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageSummary {
    pub usage: TokenUsage,
    /// Backend requests made
    pub requests: u32,
    pub tools: BTreeMap<String, ToolStats>,
}

impl UsageSummary {
    pub fn total_tool_calls(&self) -> u32 {
        self.tools.values().map(|s| s.calls).sum()
    }

    fn record_tool(&mut self, name: &str, is_error: bool) {
        let stats = self.tools.entry(name.to_string()).or_default();
        stats.calls += 1;
        if is_error {
            stats.errors += 1;
        } else {
            stats.successes += 1;
        }
    }
}

pub struct ToolUseRuntime {
    model: Arc<dyn ChatModel>,
    invoker: Arc<dyn CapabilityInvoker>,
    capabilities: Vec<Capability>,
    system_prompt: String,
    max_tool_rounds: usize,
    history: Vec<Message>,
    summary: UsageSummary,
    conversation_logger: Arc<dyn ConversationLogger>,
    progress: Arc<dyn ConsultProgress>,
}

impl ToolUseRuntime {
    pub fn new(
        system_prompt: impl Into<String>,
        model: Arc<dyn ChatModel>,
        invoker: Arc<dyn CapabilityInvoker>,
        capabilities: Vec<Capability>,
    ) -> Self {
        Self {
            model,
            invoker,
            capabilities,
            system_prompt: system_prompt.into(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            history: Vec::new(),
            summary: UsageSummary::default(),
            conversation_logger: Arc::new(NoConversationLogger),
            progress: Arc::new(NoConsultProgress),
        }
    }

    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ConsultProgress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn summary(&self) -> &UsageSummary {
        &self.summary
    }

    /// Run one request to completion and return the final answer text
    pub async fn run(&mut self, request: &str) -> Result<String, ToolLoopError> {
        let checkpoint = self.history.len();
        self.history.push(Message::user_text(request));

        self.conversation_logger.log(ConversationEvent::new(
            "user_request",
            serde_json::json!({ "text": request }),
        ));

        match self.drive().await {
            Ok(answer) => Ok(answer),
            Err(e) => {
                self.history.truncate(checkpoint);
                Err(e)
            }
        }
    }

    async fn drive(&mut self) -> Result<String, ToolLoopError> {
        let mut rounds = 0;

        loop {
            debug!(
                model = %self.model.model_id(),
                messages = self.history.len(),
                tools = self.capabilities.len(),
                "Sending request to backend"
            );
            let reply = self
                .model
                .complete(&self.system_prompt, &self.history, &self.capabilities)
                .await?;
            self.summary.requests += 1;
            self.summary.usage += reply.usage;

            let text = reply.text_content();
            let calls: Vec<(String, String, Value)> = reply
                .content
                .iter()
                .filter_map(|b| b.as_tool_use())
                .map(|(id, name, input)| (id.to_string(), name.to_string(), input.clone()))
                .collect();

            self.conversation_logger.log(ConversationEvent::new(
                "llm_response",
                serde_json::json!({
                    "model": self.model.model_id(),
                    "stop_reason": format!("{:?}", reply.stop_reason),
                    "tool_calls": calls.len(),
                    "input_tokens": reply.usage.input_tokens,
                    "output_tokens": reply.usage.output_tokens,
                    "text": text,
                }),
            ));

            if reply.stop_reason != StopReason::ToolUse || calls.is_empty() {
                // Every tool_use in the history must be followed by its result
                if !calls.is_empty() {
                    warn!(
                        stop_reason = ?reply.stop_reason,
                        tool_calls = calls.len(),
                        "Model stopped in the middle of a tool call"
                    );
                    return Err(ToolLoopError::IncompleteToolUse(reply.stop_reason));
                }
                // Only the closing reply counts as the answer
                if text.trim().is_empty() {
                    return Err(ToolLoopError::EmptyResponse);
                }
                self.history.push(Message::assistant(reply.content));
                info!(rounds, "Consultation completed");
                return Ok(text);
            }

            self.history.push(Message::assistant(reply.content));

            rounds += 1;
            if rounds > self.max_tool_rounds {
                warn!(
                    "Tool loop exceeded max_tool_rounds ({})",
                    self.max_tool_rounds
                );
                return Err(ToolLoopError::TooManyRounds(self.max_tool_rounds));
            }

            let mut results = Vec::with_capacity(calls.len());
            for (id, name, input) in calls {
                results.push(self.run_tool(id, name, input).await);
            }
            debug!(
                "Tool round {}/{}: sending {} tool results",
                rounds,
                self.max_tool_rounds,
                results.len()
            );
            self.history.push(Message::tool_results(results));
        }
    }

    /// Invoke one capability. Failures become error results for the model.
    async fn run_tool(&mut self, id: String, name: String, input: Value) -> ContentBlock {
        let preview = tool_args_preview(&input);
        info!(tool = %name, args = %preview, "Invoking capability");
        self.progress.on_tool_call(&name, &preview);
        self.conversation_logger.log(ConversationEvent::new(
            "tool_call",
            serde_json::json!({ "tool": name, "id": id, "input": input }),
        ));

        let (output, is_error) = match self.invoker.invoke(&name, input).await {
            Ok(result) => (result.text, result.is_error),
            Err(e) => {
                warn!(tool = %name, error = %e, "Capability invocation failed");
                (e.to_string(), true)
            }
        };

        self.summary.record_tool(&name, is_error);
        self.progress.on_tool_result(&name, is_error);
        self.conversation_logger.log(ConversationEvent::new(
            "tool_result",
            serde_json::json!({
                "tool": name,
                "id": id,
                "is_error": is_error,
                "bytes": output.len(),
                "preview": truncate_preview(&output, 200),
            }),
        ));

        ContentBlock::ToolResult {
            tool_use_id: id,
            output,
            is_error,
        }
    }
}
