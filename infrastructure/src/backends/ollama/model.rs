//! Ollama chat model

use super::types::{self, ChatOptions, ChatRequest, ChatResponse, ErrorResponse};
use advisor_application::{BackendError, ChatModel};
use advisor_domain::{BackendInitError, Capability, LocalModelConfig, Message, ModelReply};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, info};

/// Local models can take minutes on first load
const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

pub struct OllamaChatModel {
    client: Client,
    endpoint: Url,
    config: LocalModelConfig,
}

impl OllamaChatModel {
    /// Build the HTTP client. The server is not contacted until the first request.
    pub fn new(config: LocalModelConfig) -> Result<Self, BackendInitError> {
        let base = Url::parse(&config.host)
            .map_err(|e| BackendInitError::local(format!("invalid host '{}': {e}", config.host)))?;
        let endpoint = base
            .join("api/chat")
            .map_err(|e| BackendInitError::local(format!("invalid host '{}': {e}", config.host)))?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BackendInitError::local(e.to_string()))?;

        info!(model = %config.model_id, endpoint = %endpoint, "Ollama backend initialized");

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }
}

#[async_trait]
impl ChatModel for OllamaChatModel {
    fn model_id(&self) -> &str {
        &self.config.model_id
    }

    async fn complete(
        &self,
        system_prompt: &str,
        messages: &[Message],
        tools: &[Capability],
    ) -> Result<ModelReply, BackendError> {
        let request = ChatRequest {
            model: self.config.model_id.clone(),
            messages: types::convert_messages(system_prompt, messages),
            stream: false,
            tools: types::convert_tools(tools),
            keep_alive: self.config.keep_alive.clone(),
            options: ChatOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
        };

        debug!(
            model = %self.config.model_id,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Calling Ollama chat API"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                BackendError::Connection(format!(
                    "could not reach Ollama at {}: {e}",
                    self.config.host
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(BackendError::RequestFailed(format!(
                "Ollama returned {status}: {detail}"
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        Ok(types::convert_response(body))
    }
}
