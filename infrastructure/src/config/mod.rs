//! Configuration file loading for aws-advisor
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./advisor.toml` or `./.advisor.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/aws-advisor/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentConfig, FileBedrockConfig, FileConfig, FileLocalConfig,
    FileOutputConfig, FileProviderConfig, FileReplConfig,
};
pub use loader::{ConfigLoadError, ConfigLoader};
