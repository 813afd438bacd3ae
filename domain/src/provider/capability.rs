//! Capabilities advertised by providers and the aggregated registry
//!
//! A [`Capability`] carries only what a model needs to call a tool: its name,
//! description and JSON input schema, plus the name of the provider that
//! advertised it so calls can be routed back.
//!
//! ```text
//! documentation: [search_documentation, read_documentation]
//! terraform:     [SearchAwsProviderDocs, ExecuteTerraformCommand, ...]
//!                          │
//!                          ▼
//! CapabilityRegistry: [search_documentation, read_documentation,
//!                      SearchAwsProviderDocs, ExecuteTerraformCommand, ...]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One invocable operation advertised by a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    /// Tool name as advertised by the provider
    pub name: String,
    /// Human-readable description, if the provider supplied one
    pub description: Option<String>,
    /// JSON Schema (object) describing the tool's arguments
    pub input_schema: Value,
    /// Name of the provider that advertised this capability
    pub provider: String,
}

impl Capability {
    pub fn new(provider: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_schema: serde_json::json!({ "type": "object", "properties": {} }),
            provider: provider.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }
}

/// Capability count for one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCount {
    pub provider: String,
    pub capabilities: usize,
}

/// Per-provider and total capability counts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistryStats {
    /// Counts in provider acquisition order
    pub per_provider: Vec<ProviderCount>,
    pub total: usize,
}

/// Flat, ordered list of every capability from every active provider
///
/// Order is provider acquisition order, then each provider's own order.
/// Names are not de-duplicated.
#[derive(Debug, Clone, Default)]
pub struct CapabilityRegistry {
    capabilities: Vec<Capability>,
    stats: RegistryStats,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one provider's capability list
    ///
    /// The count is recorded even when the provider advertises nothing.
    pub fn extend_from_provider(&mut self, provider: &str, capabilities: Vec<Capability>) {
        self.stats.per_provider.push(ProviderCount {
            provider: provider.to_string(),
            capabilities: capabilities.len(),
        });
        self.stats.total += capabilities.len();
        self.capabilities.extend(capabilities);
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.capabilities.iter()
    }

    pub fn stats(&self) -> &RegistryStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(provider: &str, names: &[&str]) -> Vec<Capability> {
        names.iter().map(|n| Capability::new(provider, *n)).collect()
    }

    #[test]
    fn test_registry_concatenates_in_provider_order() {
        let mut registry = CapabilityRegistry::new();
        registry.extend_from_provider("documentation", caps("documentation", &["search", "read"]));
        registry.extend_from_provider("terraform", caps("terraform", &["a", "b", "c"]));

        let names: Vec<&str> = registry.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["search", "read", "a", "b", "c"]);
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.capabilities()[0].provider, "documentation");
        assert_eq!(registry.capabilities()[4].provider, "terraform");
    }

    #[test]
    fn test_registry_does_not_deduplicate() {
        let mut registry = CapabilityRegistry::new();
        registry.extend_from_provider("one", caps("one", &["shared"]));
        registry.extend_from_provider("two", caps("two", &["shared"]));

        assert_eq!(registry.len(), 2);
        let providers: Vec<&str> = registry.iter().map(|c| c.provider.as_str()).collect();
        assert_eq!(providers, vec!["one", "two"]);
    }

    #[test]
    fn test_stats_include_empty_providers() {
        let mut registry = CapabilityRegistry::new();
        registry.extend_from_provider("cdk", Vec::new());
        registry.extend_from_provider("pricing", caps("pricing", &["get_pricing"]));

        let stats = registry.stats();
        assert_eq!(stats.total, 1);
        assert_eq!(
            stats.per_provider,
            vec![
                ProviderCount {
                    provider: "cdk".into(),
                    capabilities: 0
                },
                ProviderCount {
                    provider: "pricing".into(),
                    capabilities: 1
                },
            ]
        );
    }

    #[test]
    fn test_default_schema_is_empty_object() {
        let cap = Capability::new("p", "t").with_description("does things");
        assert_eq!(cap.input_schema["type"], "object");
        assert_eq!(cap.description.as_deref(), Some("does things"));
    }
}
