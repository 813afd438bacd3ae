//! Tool provider configuration from TOML (`[[providers]]` array)
//!
//! ```toml
//! [[providers]]
//! name = "pricing"
//! command = "uvx"
//! args = ["awslabs.aws-pricing-mcp-server@latest"]
//! env = { FASTMCP_LOG_LEVEL = "ERROR" }
//! pass_aws_profile = true
//! ```

use advisor_domain::{AWS_PROFILE_ENV, ProviderConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MCP_LOG_LEVEL_ENV: &str = "FASTMCP_LOG_LEVEL";

/// One MCP server launched over stdio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileProviderConfig {
    /// Provider name used in logs and stats
    pub name: String,
    /// Executable (e.g. "uvx")
    pub command: String,
    /// Arguments passed to the executable
    #[serde(default)]
    pub args: Vec<String>,
    /// Forward the resolved AWS profile as `AWS_PROFILE`
    #[serde(default)]
    pub pass_aws_profile: bool,
    /// Extra environment variables
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl FileProviderConfig {
    fn awslabs(name: &str, package: &str, pass_aws_profile: bool) -> Self {
        Self {
            name: name.to_string(),
            command: "uvx".to_string(),
            args: vec![format!("awslabs.{package}@latest")],
            pass_aws_profile,
            env: BTreeMap::from([(MCP_LOG_LEVEL_ENV.to_string(), "ERROR".to_string())]),
        }
    }

    /// The four AWS Labs servers, in acquisition order
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::awslabs("documentation", "aws-documentation-mcp-server", false),
            Self::awslabs("terraform", "terraform-mcp-server", false),
            Self::awslabs("cdk", "cdk-mcp-server", false),
            Self::awslabs("pricing", "aws-pricing-mcp-server", true),
        ]
    }

    pub fn to_provider_config(&self, aws_profile: &str) -> ProviderConfig {
        let mut config = ProviderConfig::new(&self.name, &self.command);
        config.launch_args = self.args.clone();
        config.environment = self.env.clone();
        if self.pass_aws_profile {
            config
                .environment
                .insert(AWS_PROFILE_ENV.to_string(), aws_profile.to_string());
        }
        config
    }
}
