//! Spawns MCP servers and completes the initialize handshake

use super::connection::McpConnection;
use advisor_application::ports::provider::{ProviderConnection, ProviderError, ProviderLauncher};
use advisor_domain::ProviderConfig;
use async_trait::async_trait;
use rmcp::ServiceExt;
use rmcp::transport::TokioChildProcess;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Launches providers as `rmcp` child-process clients
#[derive(Debug, Clone, Default)]
pub struct McpLauncher {
    show_stderr: bool,
}

impl McpLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pass the servers' stderr through to the terminal (off by default)
    pub fn with_stderr(mut self, show: bool) -> Self {
        self.show_stderr = show;
        self
    }

    fn build_command(&self, config: &ProviderConfig) -> Command {
        let mut cmd = Command::new(&config.launch_command);
        cmd.args(&config.launch_args)
            .envs(&config.environment)
            .stderr(if self.show_stderr {
                Stdio::inherit()
            } else {
                Stdio::null()
            })
            .kill_on_drop(true);

        // Linux: request kernel to send SIGTERM to child when parent dies.
        // This catches cases where Drop doesn't run (SIGKILL, OOM kill).
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        cmd
    }
}

#[async_trait]
impl ProviderLauncher for McpLauncher {
    async fn launch(
        &self,
        config: &ProviderConfig,
    ) -> Result<Box<dyn ProviderConnection>, ProviderError> {
        if which::which(&config.launch_command).is_err() {
            return Err(ProviderError::launch(
                &config.name,
                format!("executable '{}' not found in PATH", config.launch_command),
            ));
        }

        debug!(provider = %config.name, command = %config.command_line(), "Spawning MCP server");

        let transport = TokioChildProcess::new(self.build_command(config))
            .map_err(|e| ProviderError::launch(&config.name, e.to_string()))?;

        let service = ()
            .serve(transport)
            .await
            .map_err(|e| ProviderError::launch(&config.name, format!("handshake failed: {e}")))?;

        debug!(provider = %config.name, "MCP server initialized");

        Ok(Box::new(McpConnection::new(config.name.clone(), service)))
    }
}
