//! Conversions between `rmcp` protocol types and domain types
//!
//! Both directions go through the types' JSON form (`inputSchema`,
//! `isError`, content blocks tagged by `type`) so only the wire shape is
//! relied on.

use advisor_application::ports::provider::ToolOutput;
use advisor_domain::Capability;
use serde_json::Value;

/// Build a capability from a serialized MCP `Tool`
pub fn tool_to_capability(provider: &str, tool: &Value) -> Option<Capability> {
    let name = tool.get("name")?.as_str()?;
    let mut capability = Capability::new(provider, name);

    if let Some(description) = tool.get("description").and_then(Value::as_str) {
        capability = capability.with_description(description);
    }
    if let Some(schema) = tool.get("inputSchema").filter(|s| s.is_object()) {
        capability = capability.with_input_schema(schema.clone());
    }
    Some(capability)
}

/// Flatten a serialized MCP `CallToolResult` into text
///
/// Text blocks are joined with newlines; other block types are kept as JSON.
pub fn call_result_to_output(result: &Value) -> ToolOutput {
    let is_error = result
        .get("isError")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let parts: Vec<String> = result
        .get("content")
        .and_then(Value::as_array)
        .map(|blocks| {
            blocks
                .iter()
                .map(|block| match block.get("text").and_then(Value::as_str) {
                    Some(text) => text.to_string(),
                    None => block.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    ToolOutput {
        text: parts.join("\n"),
        is_error,
    }
}

/// Arguments for `tools/call` must be a JSON object
pub fn arguments_object(arguments: Value) -> Option<serde_json::Map<String, Value>> {
    match arguments {
        Value::Object(map) => Some(map),
        Value::Null => None,
        other => {
            let mut map = serde_json::Map::new();
            map.insert("input".to_string(), other);
            Some(map)
        }
    }
}
