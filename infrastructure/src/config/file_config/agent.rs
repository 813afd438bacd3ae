//! Consultant configuration from TOML (`[agent]` section)

use advisor_domain::CONSULTANT_SYSTEM_PROMPT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Maximum tool rounds per request (default: 20)
    pub max_tool_rounds: usize,
    /// Replaces the built-in consultant prompt
    pub system_prompt: Option<String>,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            max_tool_rounds: 20,
            system_prompt: None,
        }
    }
}

impl FileAgentConfig {
    pub fn system_prompt(&self) -> &str {
        self.system_prompt
            .as_deref()
            .unwrap_or(CONSULTANT_SYSTEM_PROMPT)
    }
}
