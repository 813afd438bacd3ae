//! Provider session lifecycle
//!
//! ```text
//! NotStarted ──start()──▶ Active ──stop()──▶ Closed
//!      │                                       ▲
//!      └──────────────stop()───────────────────┘
//! ```
//!
//! A session never relaunches: `start` on an `Active` or `Closed` session is
//! rejected. Capabilities are fetched once and memoized.

use crate::ports::provider::{ProviderConnection, ProviderError, ProviderLauncher, ToolOutput};
use advisor_domain::{Capability, ProviderConfig};
use serde_json::Value;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Active,
    Closed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::NotStarted => "not started",
            SessionState::Active => "active",
            SessionState::Closed => "closed",
        }
    }
}

/// One provider subprocess and its memoized capability list
pub struct ProviderSession {
    config: ProviderConfig,
    state: SessionState,
    connection: Option<Box<dyn ProviderConnection>>,
    capabilities: Option<Vec<Capability>>,
}

impl ProviderSession {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            state: SessionState::NotStarted,
            connection: None,
            capabilities: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Launch the subprocess and complete the handshake
    pub async fn start(&mut self, launcher: &dyn ProviderLauncher) -> Result<(), ProviderError> {
        if self.state != SessionState::NotStarted {
            return Err(self.invalid_state("start"));
        }

        debug!(provider = %self.config.name, command = %self.config.command_line(), "Launching provider");
        let connection = launcher.launch(&self.config).await?;
        self.connection = Some(connection);
        self.state = SessionState::Active;
        info!(provider = %self.config.name, "Provider started");
        Ok(())
    }

    /// Capabilities advertised by the provider, fetched on first call
    pub async fn list_capabilities(&mut self) -> Result<Vec<Capability>, ProviderError> {
        let connection = self.active_connection("list capabilities")?;

        if let Some(capabilities) = &self.capabilities {
            return Ok(capabilities.clone());
        }

        let capabilities = connection.list_capabilities().await?;
        debug!(
            provider = %self.config.name,
            tools = capabilities.len(),
            "Listed provider capabilities"
        );
        self.capabilities = Some(capabilities.clone());
        Ok(capabilities)
    }

    /// Forward one capability call to the subprocess
    pub async fn invoke(&self, name: &str, arguments: Value) -> Result<ToolOutput, ProviderError> {
        let connection = self.active_connection("invoke")?;
        connection.invoke(name, arguments).await
    }

    /// Terminate the subprocess. Idempotent; never fails.
    pub async fn stop(&mut self) {
        match self.state {
            SessionState::Closed => {}
            SessionState::NotStarted => {
                self.state = SessionState::Closed;
            }
            SessionState::Active => {
                self.state = SessionState::Closed;
                if let Some(mut connection) = self.connection.take() {
                    if let Err(e) = connection.shutdown().await {
                        warn!(provider = %self.config.name, error = %e, "Provider shutdown failed");
                    }
                }
                info!(provider = %self.config.name, "Provider stopped");
            }
        }
    }

    fn active_connection(
        &self,
        operation: &'static str,
    ) -> Result<&dyn ProviderConnection, ProviderError> {
        match (&self.state, &self.connection) {
            (SessionState::Active, Some(connection)) => Ok(connection.as_ref()),
            _ => Err(self.invalid_state(operation)),
        }
    }

    fn invalid_state(&self, operation: &'static str) -> ProviderError {
        ProviderError::InvalidState {
            provider: self.config.name.clone(),
            state: self.state.as_str(),
            operation,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    /// Records launches, list calls and shutdowns across all providers
    #[derive(Default)]
    pub struct Journal {
        pub events: Mutex<Vec<String>>,
    }

    impl Journal {
        pub fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }

        pub fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    pub struct MockConnection {
        name: String,
        tools: Vec<String>,
        fail_list: bool,
        rendezvous: Option<Arc<tokio::sync::Barrier>>,
        journal: Arc<Journal>,
    }

    #[async_trait]
    impl ProviderConnection for MockConnection {
        async fn list_capabilities(&self) -> Result<Vec<Capability>, ProviderError> {
            self.journal.push(format!("list:{}", self.name));
            if self.fail_list {
                return Err(ProviderError::communication(&self.name, "broken pipe"));
            }
            Ok(self
                .tools
                .iter()
                .map(|t| Capability::new(&self.name, t))
                .collect())
        }

        async fn invoke(&self, name: &str, arguments: Value) -> Result<ToolOutput, ProviderError> {
            self.journal.push(format!("invoke:{}:{}", self.name, name));
            if let (Some(barrier), "rendezvous") = (&self.rendezvous, name) {
                barrier.wait().await;
            }
            if name == "explode" {
                return Err(ProviderError::communication(&self.name, "connection reset"));
            }
            Ok(ToolOutput::success(format!(
                "{} handled {} with {}",
                self.name, name, arguments
            )))
        }

        async fn shutdown(&mut self) -> Result<(), ProviderError> {
            self.journal.push(format!("stop:{}", self.name));
            Ok(())
        }
    }

    /// Launcher whose providers are described by name
    #[derive(Default)]
    pub struct MockLauncher {
        pub tools: HashMap<String, Vec<String>>,
        pub fail_launch: HashSet<String>,
        pub fail_list: HashSet<String>,
        pub rendezvous: Option<Arc<tokio::sync::Barrier>>,
        pub journal: Arc<Journal>,
    }

    impl MockLauncher {
        pub fn with_provider(mut self, name: &str, tools: &[&str]) -> Self {
            self.tools
                .insert(name.to_string(), tools.iter().map(|t| t.to_string()).collect());
            self
        }

        pub fn failing_launch(mut self, name: &str) -> Self {
            self.fail_launch.insert(name.to_string());
            self
        }

        pub fn failing_list(mut self, name: &str) -> Self {
            self.fail_list.insert(name.to_string());
            self
        }

        /// `rendezvous` calls block until `parties` of them are in flight
        pub fn with_rendezvous(mut self, parties: usize) -> Self {
            self.rendezvous = Some(Arc::new(tokio::sync::Barrier::new(parties)));
            self
        }
    }

    #[async_trait]
    impl ProviderLauncher for MockLauncher {
        async fn launch(
            &self,
            config: &ProviderConfig,
        ) -> Result<Box<dyn ProviderConnection>, ProviderError> {
            self.journal.push(format!("launch:{}", config.name));
            if self.fail_launch.contains(&config.name) {
                return Err(ProviderError::launch(&config.name, "executable not found"));
            }
            Ok(Box::new(MockConnection {
                name: config.name.clone(),
                tools: self.tools.get(&config.name).cloned().unwrap_or_default(),
                fail_list: self.fail_list.contains(&config.name),
                rendezvous: self.rendezvous.clone(),
                journal: self.journal.clone(),
            }))
        }
    }

    pub fn provider(name: &str) -> ProviderConfig {
        ProviderConfig::new(name, "uvx").with_arg(format!("awslabs.{name}-mcp-server@latest"))
    }
}
