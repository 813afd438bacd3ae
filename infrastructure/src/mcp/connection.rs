//! A running MCP client session

use super::convert::{arguments_object, call_result_to_output, tool_to_capability};
use advisor_application::ports::provider::{ProviderConnection, ProviderError, ToolOutput};
use advisor_domain::Capability;
use async_trait::async_trait;
use rmcp::RoleClient;
use rmcp::model::CallToolRequestParam;
use rmcp::service::RunningService;
use serde_json::Value;
use tracing::{debug, warn};

pub struct McpConnection {
    provider: String,
    service: Option<RunningService<RoleClient, ()>>,
}

impl McpConnection {
    pub fn new(provider: String, service: RunningService<RoleClient, ()>) -> Self {
        Self {
            provider,
            service: Some(service),
        }
    }

    fn service(&self) -> Result<&RunningService<RoleClient, ()>, ProviderError> {
        self.service.as_ref().ok_or_else(|| ProviderError::InvalidState {
            provider: self.provider.clone(),
            state: "closed",
            operation: "send requests",
        })
    }

    fn communication(&self, e: impl std::fmt::Display) -> ProviderError {
        ProviderError::communication(&self.provider, e.to_string())
    }
}

#[async_trait]
impl ProviderConnection for McpConnection {
    async fn list_capabilities(&self) -> Result<Vec<Capability>, ProviderError> {
        let tools = self
            .service()?
            .list_all_tools()
            .await
            .map_err(|e| self.communication(e))?;

        let mut capabilities = Vec::with_capacity(tools.len());
        for tool in &tools {
            let value = serde_json::to_value(tool).map_err(|e| self.communication(e))?;
            match tool_to_capability(&self.provider, &value) {
                Some(capability) => capabilities.push(capability),
                None => warn!(provider = %self.provider, "Skipping tool without a name"),
            }
        }
        Ok(capabilities)
    }

    async fn invoke(&self, name: &str, arguments: Value) -> Result<ToolOutput, ProviderError> {
        let request = CallToolRequestParam {
            name: name.to_string().into(),
            arguments: arguments_object(arguments),
        };

        let result = self
            .service()?
            .call_tool(request)
            .await
            .map_err(|e| self.communication(e))?;

        let value = serde_json::to_value(&result).map_err(|e| self.communication(e))?;
        Ok(call_result_to_output(&value))
    }

    async fn shutdown(&mut self) -> Result<(), ProviderError> {
        let Some(service) = self.service.take() else {
            return Ok(());
        };
        let reason = service.cancel().await.map_err(|e| self.communication(e))?;
        debug!(provider = %self.provider, ?reason, "MCP session closed");
        Ok(())
    }
}
