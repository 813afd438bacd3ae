//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain types on demand.

mod agent;
mod backend;
mod output;
mod providers;
mod repl;

pub use agent::FileAgentConfig;
pub use backend::{FileBedrockConfig, FileLocalConfig};
pub use output::FileOutputConfig;
pub use providers::FileProviderConfig;
pub use repl::FileReplConfig;

use advisor_domain::ProviderConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("provider name cannot be empty (providers[{index}])")]
    EmptyProviderName { index: usize },

    #[error("provider '{name}' has an empty command")]
    EmptyProviderCommand { name: String },

    #[error("provider '{name}' is configured more than once")]
    DuplicateProvider { name: String },

    #[error("agent.max_tool_rounds cannot be 0")]
    ZeroToolRounds,

    #[error("agent.system_prompt cannot be empty")]
    EmptySystemPrompt,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Reasoning backend settings
    pub bedrock: FileBedrockConfig,
    pub local: FileLocalConfig,
    /// Consultant settings
    pub agent: FileAgentConfig,
    /// Transcript settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Tool providers, in acquisition order
    pub providers: Vec<FileProviderConfig>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            bedrock: FileBedrockConfig::default(),
            local: FileLocalConfig::default(),
            agent: FileAgentConfig::default(),
            output: FileOutputConfig::default(),
            repl: FileReplConfig::default(),
            providers: FileProviderConfig::defaults(),
        }
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for (index, provider) in self.providers.iter().enumerate() {
            if provider.name.trim().is_empty() {
                issues.push(ConfigValidationError::EmptyProviderName { index });
                continue;
            }
            if provider.command.trim().is_empty() {
                issues.push(ConfigValidationError::EmptyProviderCommand {
                    name: provider.name.clone(),
                });
            }
            if !seen.insert(provider.name.as_str()) {
                issues.push(ConfigValidationError::DuplicateProvider {
                    name: provider.name.clone(),
                });
            }
        }

        if self.agent.max_tool_rounds == 0 {
            issues.push(ConfigValidationError::ZeroToolRounds);
        }
        if matches!(&self.agent.system_prompt, Some(p) if p.trim().is_empty()) {
            issues.push(ConfigValidationError::EmptySystemPrompt);
        }

        issues
    }

    /// Provider launch configs with the AWS profile applied
    pub fn provider_configs(&self, aws_profile: &str) -> Vec<ProviderConfig> {
        self.providers
            .iter()
            .map(|p| p.to_provider_config(aws_profile))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[bedrock]
model_id = "anthropic.claude-3-5-haiku-20241022-v1:0"
region = "eu-west-1"
max_tokens = 2048

[local]
host = "http://gpu-box:11434"
model_id = "llama3.1:8b"

[agent]
max_tool_rounds = 8

[output]
dir = "transcripts"

[repl]
show_progress = false

[[providers]]
name = "documentation"
command = "uvx"
args = ["awslabs.aws-documentation-mcp-server@latest"]

[[providers]]
name = "pricing"
command = "/opt/bin/pricing-server"
env = { FASTMCP_LOG_LEVEL = "DEBUG" }
pass_aws_profile = true
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.bedrock.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.bedrock.max_tokens, 2048);
        assert_eq!(config.local.model_id, "llama3.1:8b");
        // Unset local fields keep their defaults
        assert_eq!(config.local.keep_alive, "10m");
        assert_eq!(config.agent.max_tool_rounds, 8);
        assert_eq!(config.output.dir, "transcripts");
        assert!(!config.repl.show_progress);
        assert_eq!(config.providers.len(), 2);
        assert!(config.providers[1].pass_aws_profile);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[local]
temperature = 0.5
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.local.temperature, 0.5);
        assert_eq!(config.local.host, "http://localhost:11434");
        assert_eq!(config.providers.len(), 4);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.output.dir, "outputs");
        assert_eq!(config.agent.max_tool_rounds, 20);
        assert!(config.agent.system_prompt.is_none());
        assert!(config.validate().is_empty());

        let providers = config.provider_configs("default");
        assert_eq!(providers[3].name, "pricing");
        assert_eq!(providers[3].environment.get("AWS_PROFILE").unwrap(), "default");
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let mut config = FileConfig::default();
        config.providers.push(FileProviderConfig {
            name: "cdk".into(),
            command: "".into(),
            args: vec![],
            env: Default::default(),
            pass_aws_profile: false,
        });
        config.providers.push(FileProviderConfig {
            name: " ".into(),
            command: "uvx".into(),
            args: vec![],
            env: Default::default(),
            pass_aws_profile: false,
        });
        config.agent.max_tool_rounds = 0;
        config.agent.system_prompt = Some("   ".into());

        let issues = config.validate();
        assert_eq!(
            issues,
            vec![
                ConfigValidationError::EmptyProviderCommand { name: "cdk".into() },
                ConfigValidationError::DuplicateProvider { name: "cdk".into() },
                ConfigValidationError::EmptyProviderName { index: 5 },
                ConfigValidationError::ZeroToolRounds,
                ConfigValidationError::EmptySystemPrompt,
            ]
        );
    }

    #[test]
    fn test_serializes_to_toml() {
        let text = toml::to_string_pretty(&FileConfig::default()).unwrap();
        assert!(text.contains("[[providers]]"));
        assert!(text.contains("awslabs.aws-pricing-mcp-server@latest"));
        let back: FileConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.providers, FileConfig::default().providers);
    }
}
