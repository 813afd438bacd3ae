//! Bedrock chat model
//!
//! Wraps the Converse API. The API is stateless; the caller's history is
//! converted and sent in full on every call.

use super::types;
use advisor_application::{BackendError, ChatModel};
use advisor_domain::{BackendInitError, Capability, Message, ModelReply, RemoteModelConfig};
use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::types as bedrock;
use tracing::{debug, info};

pub struct BedrockChatModel {
    client: BedrockClient,
    config: RemoteModelConfig,
}

impl BedrockChatModel {
    /// Load AWS configuration for the profile and build a client.
    ///
    /// Credentials are resolved lazily by the SDK, so bad credentials show
    /// up on the first request rather than here.
    pub async fn new(config: RemoteModelConfig) -> Result<Self, BackendInitError> {
        if config.max_tokens > i32::MAX as u32 {
            return Err(BackendInitError::remote(format!(
                "max_tokens {} is out of range",
                config.max_tokens
            )));
        }

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .profile_name(&config.profile);
        if let Some(region) = &config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        let aws_config = loader.load().await;

        if aws_config.region().is_none() {
            return Err(BackendInitError::remote(format!(
                "no AWS region configured for profile '{}'",
                config.profile
            )));
        }

        info!(
            model = %config.model_id,
            profile = %config.profile,
            region = ?aws_config.region(),
            "Bedrock backend initialized"
        );

        Ok(Self {
            client: BedrockClient::new(&aws_config),
            config,
        })
    }
}

#[async_trait]
impl ChatModel for BedrockChatModel {
    fn model_id(&self) -> &str {
        &self.config.model_id
    }

    async fn complete(
        &self,
        system_prompt: &str,
        messages: &[Message],
        tools: &[Capability],
    ) -> Result<ModelReply, BackendError> {
        let messages = messages
            .iter()
            .map(types::convert_message)
            .collect::<Result<Vec<_>, _>>()?;

        let mut request = self
            .client
            .converse()
            .model_id(&self.config.model_id)
            .set_system(Some(vec![bedrock::SystemContentBlock::Text(
                system_prompt.to_string(),
            )]))
            .set_messages(Some(messages.clone()))
            .inference_config(
                bedrock::InferenceConfiguration::builder()
                    .max_tokens(self.config.max_tokens as i32)
                    .set_temperature(self.config.temperature)
                    .build(),
            );

        if let Some(tool_config) = types::convert_tool_config(tools)? {
            request = request.tool_config(tool_config);
        }

        debug!(
            model = %self.config.model_id,
            messages = messages.len(),
            tools = tools.len(),
            "Calling Bedrock Converse API"
        );

        let response = request
            .send()
            .await
            .map_err(|e| types::convert_converse_error(&e))?;

        let output = response.output().ok_or_else(|| {
            BackendError::InvalidResponse("No output in Bedrock response".to_string())
        })?;

        types::convert_converse_output(output, response.stop_reason(), response.usage())
    }
}
