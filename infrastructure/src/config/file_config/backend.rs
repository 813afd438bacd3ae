//! Reasoning backend configuration from TOML (`[bedrock]` and `[local]`)

use advisor_domain::{DEFAULT_REMOTE_MODEL_ID, LocalModelConfig, RemoteModelConfig};
use serde::{Deserialize, Serialize};

/// AWS Bedrock settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBedrockConfig {
    /// Bedrock model or inference profile ID
    pub model_id: String,
    /// AWS region (default: resolved by the AWS SDK)
    pub region: Option<String>,
    /// Max tokens per response (default: 4096)
    pub max_tokens: u32,
    /// Sampling temperature (default: model default)
    pub temperature: Option<f32>,
}

impl Default for FileBedrockConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_REMOTE_MODEL_ID.to_string(),
            region: None,
            max_tokens: 4096,
            temperature: None,
        }
    }
}

impl FileBedrockConfig {
    pub fn to_remote_config(&self, aws_profile: &str) -> RemoteModelConfig {
        RemoteModelConfig {
            model_id: self.model_id.clone(),
            region: self.region.clone(),
            profile: aws_profile.to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Ollama settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLocalConfig {
    pub host: String,
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub keep_alive: String,
}

impl Default for FileLocalConfig {
    fn default() -> Self {
        let defaults = LocalModelConfig::default();
        Self {
            host: defaults.host,
            model_id: defaults.model_id,
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
            keep_alive: defaults.keep_alive,
        }
    }
}

impl FileLocalConfig {
    pub fn to_local_config(&self) -> LocalModelConfig {
        LocalModelConfig {
            host: self.host.clone(),
            model_id: self.model_id.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            keep_alive: self.keep_alive.clone(),
        }
    }
}
