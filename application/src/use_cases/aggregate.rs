//! Capability aggregation
//!
//! Starts every configured provider in order, collects their capabilities
//! into one [`CapabilityRegistry`] and hands back a [`CapabilityScope`] that
//! owns the running sessions.
//!
//! Acquisition is all-or-nothing: if any provider fails to start or to list
//! its capabilities, every provider started so far is stopped (newest first)
//! before the error is returned.

use crate::ports::progress::{AcquireProgress, NoAcquireProgress};
use crate::ports::provider::{CapabilityInvoker, ProviderError, ProviderLauncher, ToolOutput};
use crate::use_cases::provider_session::ProviderSession;
use advisor_domain::{CapabilityRegistry, ProviderConfig};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// A provider failed during acquisition; everything started was stopped
#[derive(Error, Debug)]
#[error("Failed to acquire provider '{provider}': {source}")]
pub struct AggregationError {
    pub provider: String,
    #[source]
    pub source: ProviderError,
}

pub struct CapabilityAggregator {
    launcher: Arc<dyn ProviderLauncher>,
    progress: Arc<dyn AcquireProgress>,
}

impl CapabilityAggregator {
    pub fn new(launcher: Arc<dyn ProviderLauncher>) -> Self {
        Self {
            launcher,
            progress: Arc::new(NoAcquireProgress),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn AcquireProgress>) -> Self {
        self.progress = progress;
        self
    }

    /// Start and enumerate every provider, in order
    pub async fn acquire_all(
        &self,
        configs: &[ProviderConfig],
    ) -> Result<CapabilityScope, AggregationError> {
        let mut sessions: Vec<ProviderSession> = Vec::with_capacity(configs.len());
        let mut registry = CapabilityRegistry::new();

        for config in configs {
            self.progress.on_provider_starting(&config.name);
            let mut session = ProviderSession::new(config.clone());

            let result = match session.start(self.launcher.as_ref()).await {
                Ok(()) => session.list_capabilities().await,
                Err(e) => Err(e),
            };

            match result {
                Ok(capabilities) => {
                    info!(provider = %config.name, tools = capabilities.len(), "Provider ready");
                    self.progress
                        .on_provider_ready(&config.name, capabilities.len());
                    registry.extend_from_provider(&config.name, capabilities);
                    sessions.push(session);
                }
                Err(source) => {
                    warn!(provider = %config.name, error = %source, "Provider acquisition failed");
                    self.progress
                        .on_provider_failed(&config.name, &source.to_string());

                    // A started-but-unenumerated session is released too
                    sessions.push(session);
                    stop_in_reverse(&mut sessions).await;

                    return Err(AggregationError {
                        provider: config.name.clone(),
                        source,
                    });
                }
            }
        }

        let stats = registry.stats();
        info!(
            providers = stats.per_provider.len(),
            tools = stats.total,
            "Capability registry assembled"
        );

        Ok(CapabilityScope::new(sessions, registry))
    }

    /// Run `body` with an acquired scope and always release it afterwards
    pub async fn with_capabilities<F, Fut, T>(
        &self,
        configs: &[ProviderConfig],
        body: F,
    ) -> Result<T, AggregationError>
    where
        F: FnOnce(Arc<CapabilityScope>) -> Fut,
        Fut: Future<Output = T>,
    {
        let scope = Arc::new(self.acquire_all(configs).await?);
        let output = body(scope.clone()).await;
        scope.release().await;
        Ok(output)
    }
}

async fn stop_in_reverse(sessions: &mut [ProviderSession]) {
    for session in sessions.iter_mut().rev() {
        session.stop().await;
    }
}

/// Running provider sessions plus the registry built from them
///
/// Capability calls share a read lock, so concurrent calls do not wait on
/// each other. `release` takes the write lock once in-flight calls finish.
pub struct CapabilityScope {
    sessions: RwLock<Vec<ProviderSession>>,
    registry: CapabilityRegistry,
    /// Capability name -> index of the first session advertising it
    routes: HashMap<String, usize>,
}

impl CapabilityScope {
    fn new(sessions: Vec<ProviderSession>, registry: CapabilityRegistry) -> Self {
        let index: HashMap<&str, usize> = sessions
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name(), i))
            .collect();

        let mut routes = HashMap::new();
        for capability in registry.iter() {
            if let Some(&i) = index.get(capability.provider.as_str()) {
                routes.entry(capability.name.clone()).or_insert(i);
            }
        }

        Self {
            sessions: RwLock::new(sessions),
            registry,
            routes,
        }
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Stop every session, newest first. Safe to call more than once.
    pub async fn release(&self) {
        let mut sessions = self.sessions.write().await;
        debug!(providers = sessions.len(), "Releasing provider sessions");
        stop_in_reverse(&mut sessions).await;
    }
}

#[async_trait]
impl CapabilityInvoker for CapabilityScope {
    async fn invoke(&self, name: &str, arguments: Value) -> Result<ToolOutput, ProviderError> {
        let index = *self
            .routes
            .get(name)
            .ok_or_else(|| ProviderError::UnknownCapability(name.to_string()))?;

        let sessions = self.sessions.read().await;
        let session = sessions
            .get(index)
            .ok_or_else(|| ProviderError::UnknownCapability(name.to_string()))?;
        debug!(provider = %session.name(), tool = %name, "Routing capability call");
        session.invoke(name, arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::provider_session::test_support::*;
    use advisor_domain::ProviderCount;
    use serde_json::json;

    fn configs(names: &[&str]) -> Vec<ProviderConfig> {
        names.iter().map(|n| provider(n)).collect()
    }

    #[tokio::test]
    async fn test_registry_follows_configuration_order() {
        let launcher = Arc::new(
            MockLauncher::default()
                .with_provider("documentation", &["search_documentation", "read_documentation"])
                .with_provider("terraform", &["SearchAwsProviderDocs", "RunCheckov", "ExecuteTerraformCommand"]),
        );
        let aggregator = CapabilityAggregator::new(launcher.clone());

        let scope = aggregator
            .acquire_all(&configs(&["documentation", "terraform"]))
            .await
            .unwrap();

        let names: Vec<_> = scope.registry().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "search_documentation",
                "read_documentation",
                "SearchAwsProviderDocs",
                "RunCheckov",
                "ExecuteTerraformCommand"
            ]
        );
        assert_eq!(scope.registry().stats().total, 5);
        assert_eq!(
            scope.registry().stats().per_provider[1],
            ProviderCount {
                provider: "terraform".into(),
                capabilities: 3
            }
        );

        scope.release().await;
    }

    #[tokio::test]
    async fn test_failure_stops_started_providers() {
        let launcher = Arc::new(
            MockLauncher::default()
                .with_provider("documentation", &["search_documentation"])
                .failing_launch("cdk"),
        );
        let aggregator = CapabilityAggregator::new(launcher.clone());

        let err = aggregator
            .acquire_all(&configs(&["documentation", "cdk", "pricing"]))
            .await
            .err()
            .unwrap();

        assert_eq!(err.provider, "cdk");
        assert!(matches!(err.source, ProviderError::Launch { .. }));
        assert_eq!(
            launcher.journal.events(),
            vec![
                "launch:documentation",
                "list:documentation",
                "launch:cdk",
                "stop:documentation"
            ]
        );
    }

    #[tokio::test]
    async fn test_enumeration_failure_stops_in_reverse() {
        let launcher = Arc::new(
            MockLauncher::default()
                .with_provider("documentation", &["a"])
                .with_provider("terraform", &["b"])
                .with_provider("cdk", &["c"])
                .failing_list("cdk"),
        );
        let aggregator = CapabilityAggregator::new(launcher.clone());

        let err = aggregator
            .acquire_all(&configs(&["documentation", "terraform", "cdk"]))
            .await
            .err()
            .unwrap();
        assert_eq!(err.provider, "cdk");

        let stops: Vec<_> = launcher
            .journal
            .events()
            .into_iter()
            .filter(|e| e.starts_with("stop:"))
            .collect();
        assert_eq!(stops, vec!["stop:cdk", "stop:terraform", "stop:documentation"]);
    }

    #[tokio::test]
    async fn test_release_stops_in_reverse_order() {
        let launcher = Arc::new(
            MockLauncher::default()
                .with_provider("documentation", &[])
                .with_provider("terraform", &[])
                .with_provider("cdk", &[])
                .with_provider("pricing", &[]),
        );
        let aggregator = CapabilityAggregator::new(launcher.clone());
        let scope = aggregator
            .acquire_all(&configs(&["documentation", "terraform", "cdk", "pricing"]))
            .await
            .unwrap();

        scope.release().await;
        scope.release().await;

        let stops: Vec<_> = launcher
            .journal
            .events()
            .into_iter()
            .filter(|e| e.starts_with("stop:"))
            .collect();
        assert_eq!(
            stops,
            vec!["stop:pricing", "stop:cdk", "stop:terraform", "stop:documentation"]
        );
    }

    #[tokio::test]
    async fn test_invoke_routes_to_first_provider() {
        let launcher = Arc::new(
            MockLauncher::default()
                .with_provider("one", &["shared", "only_one"])
                .with_provider("two", &["shared", "only_two"]),
        );
        let aggregator = CapabilityAggregator::new(launcher.clone());
        let scope = aggregator.acquire_all(&configs(&["one", "two"])).await.unwrap();

        let output = scope.invoke("shared", json!({})).await.unwrap();
        assert!(output.text.starts_with("one handled shared"));

        let output = scope.invoke("only_two", json!({"x": 1})).await.unwrap();
        assert!(output.text.starts_with("two handled only_two"));

        let err = scope.invoke("missing", json!({})).await.unwrap_err();
        assert!(matches!(err, ProviderError::UnknownCapability(_)));

        scope.release().await;
    }

    #[tokio::test]
    async fn test_concurrent_invocations_do_not_serialize() {
        let launcher = Arc::new(
            MockLauncher::default()
                .with_provider("one", &["rendezvous"])
                .with_rendezvous(2),
        );
        let aggregator = CapabilityAggregator::new(launcher);
        let scope = aggregator.acquire_all(&configs(&["one"])).await.unwrap();

        // Each call waits until the other is in flight
        let both = tokio::time::timeout(std::time::Duration::from_secs(5), async {
            tokio::join!(
                scope.invoke("rendezvous", json!({})),
                scope.invoke("rendezvous", json!({}))
            )
        })
        .await
        .expect("calls should run concurrently");
        assert!(both.0.is_ok());
        assert!(both.1.is_ok());

        scope.release().await;
    }

    #[tokio::test]
    async fn test_invoke_after_release_is_rejected() {
        let launcher = Arc::new(MockLauncher::default().with_provider("one", &["tool"]));
        let aggregator = CapabilityAggregator::new(launcher);
        let scope = aggregator.acquire_all(&configs(&["one"])).await.unwrap();
        scope.release().await;

        let err = scope.invoke("tool", json!({})).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidState { .. }));
    }

    #[tokio::test]
    async fn test_with_capabilities_releases_after_body() {
        let launcher = Arc::new(
            MockLauncher::default()
                .with_provider("documentation", &["search_documentation"])
                .with_provider("pricing", &["get_pricing"]),
        );
        let aggregator = CapabilityAggregator::new(launcher.clone());

        let total = aggregator
            .with_capabilities(&configs(&["documentation", "pricing"]), |scope| async move {
                scope.registry().len()
            })
            .await
            .unwrap();
        assert_eq!(total, 2);

        let events = launcher.journal.events();
        assert_eq!(
            &events[events.len() - 2..],
            &["stop:pricing".to_string(), "stop:documentation".to_string()]
        );
    }

    #[tokio::test]
    async fn test_with_capabilities_releases_when_body_fails() {
        let launcher = Arc::new(MockLauncher::default().with_provider("cdk", &["x"]));
        let aggregator = CapabilityAggregator::new(launcher.clone());

        let result: Result<Result<(), String>, _> = aggregator
            .with_capabilities(&configs(&["cdk"]), |_scope| async move {
                Err("body failed".to_string())
            })
            .await;

        assert_eq!(result.unwrap(), Err("body failed".to_string()));
        assert!(launcher.journal.events().contains(&"stop:cdk".to_string()));
    }
}
