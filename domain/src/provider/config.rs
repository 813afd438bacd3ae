//! Provider launch configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How to launch one tool provider subprocess
///
/// A provider is an MCP server spoken to over stdio. The triple
/// (command, args, environment) is all the advisor knows about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Stable provider name used in logs and stats (e.g. "documentation")
    pub name: String,
    /// Executable to launch (e.g. "uvx")
    pub launch_command: String,
    /// Arguments passed to the executable, in order
    pub launch_args: Vec<String>,
    /// Extra environment variables for the subprocess
    pub environment: BTreeMap<String, String>,
}

impl ProviderConfig {
    pub fn new(name: impl Into<String>, launch_command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            launch_command: launch_command.into(),
            launch_args: Vec::new(),
            environment: BTreeMap::new(),
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.launch_args.push(arg.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    /// Command line as it would be typed into a shell, for diagnostics
    pub fn command_line(&self) -> String {
        std::iter::once(self.launch_command.as_str())
            .chain(self.launch_args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
