//! Backend handle and per-backend model settings

/// Default Bedrock model (cross-region inference profile)
pub const DEFAULT_REMOTE_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

/// Locally hosted model settings (Ollama).
#[derive(Debug, Clone, PartialEq)]
pub struct LocalModelConfig {
    /// Base URL of the local runtime (default: "http://localhost:11434").
    pub host: String,
    /// Model identifier as known to the runtime (default: "qwen3:4b").
    pub model_id: String,
    /// Max tokens per response (default: 20000).
    pub max_tokens: u32,
    /// Sampling temperature (default: 0.1).
    pub temperature: f32,
    /// How long the runtime keeps the model loaded (default: "10m").
    pub keep_alive: String,
}

impl Default for LocalModelConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".to_string(),
            model_id: "qwen3:4b".to_string(),
            max_tokens: 20000,
            temperature: 0.1,
            keep_alive: "10m".to_string(),
        }
    }
}

/// Remote managed model settings (AWS Bedrock).
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteModelConfig {
    /// Bedrock model or inference profile ID.
    pub model_id: String,
    /// AWS region. `None` defers to the SDK's own resolution chain.
    pub region: Option<String>,
    /// AWS profile used for credentials.
    pub profile: String,
    /// Max tokens per response (default: 4096).
    pub max_tokens: u32,
    /// Sampling temperature. `None` uses the model default.
    pub temperature: Option<f32>,
}

impl Default for RemoteModelConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_REMOTE_MODEL_ID.to_string(),
            region: None,
            profile: "default".to_string(),
            max_tokens: 4096,
            temperature: None,
        }
    }
}

/// The reasoning backend chosen for one run
///
/// Selected once, immutable afterwards, and passed explicitly to whatever
/// builds the conversational session.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendHandle {
    /// Remote managed model (default)
    Remote(RemoteModelConfig),
    /// Locally hosted model (opt-in)
    Local(LocalModelConfig),
}

impl BackendHandle {
    pub fn is_local(&self) -> bool {
        matches!(self, BackendHandle::Local(_))
    }

    pub fn model_id(&self) -> &str {
        match self {
            BackendHandle::Remote(config) => &config.model_id,
            BackendHandle::Local(config) => &config.model_id,
        }
    }

    /// Short label for banners, e.g. "qwen3:4b (local)"
    pub fn display_name(&self) -> String {
        match self {
            BackendHandle::Remote(config) => format!("{} via AWS Bedrock", config.model_id),
            BackendHandle::Local(config) => format!("{} (local)", config.model_id),
        }
    }
}

impl std::fmt::Display for BackendHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_defaults() {
        let config = LocalModelConfig::default();
        assert_eq!(config.host, "http://localhost:11434");
        assert_eq!(config.model_id, "qwen3:4b");
        assert_eq!(config.max_tokens, 20000);
        assert_eq!(config.keep_alive, "10m");
    }

    #[test]
    fn test_handle_model_id() {
        let remote = BackendHandle::Remote(RemoteModelConfig::default());
        assert_eq!(remote.model_id(), DEFAULT_REMOTE_MODEL_ID);
        assert!(!remote.is_local());

        let local = BackendHandle::Local(LocalModelConfig::default());
        assert_eq!(local.model_id(), "qwen3:4b");
        assert!(local.is_local());
        assert_eq!(local.to_string(), "qwen3:4b (local)");
    }
}
