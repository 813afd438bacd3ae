//! Shared helpers for tool use cases.

use serde_json::Value;

/// Extract a short preview string from tool call arguments.
///
/// Looks for well-known keys of the AWS providers first, then falls back to
/// the first string value found.
pub(crate) fn tool_args_preview(arguments: &Value) -> String {
    let Some(object) = arguments.as_object() else {
        return String::new();
    };

    let keys = ["search_phrase", "query", "service_code", "url", "construct_type"];
    for key in &keys {
        if let Some(Value::String(s)) = object.get(*key) {
            return truncate_preview(s, 50);
        }
    }
    object
        .values()
        .find_map(|v| v.as_str())
        .map(|s| truncate_preview(s, 50))
        .unwrap_or_default()
}

pub(crate) fn truncate_preview(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_key_preferred() {
        let args = json!({"limit": "10", "search_phrase": "S3 bucket policy"});
        assert_eq!(tool_args_preview(&args), "S3 bucket policy");
    }

    #[test]
    fn test_fallback_to_first_string() {
        let args = json!({"n": 3, "region": "us-east-1"});
        assert_eq!(tool_args_preview(&args), "us-east-1");
    }

    #[test]
    fn test_non_object_is_empty() {
        assert_eq!(tool_args_preview(&json!(42)), "");
        assert_eq!(tool_args_preview(&json!({"n": 1})), "");
    }

    #[test]
    fn test_truncation_counts_chars() {
        let long = "é".repeat(60);
        let preview = truncate_preview(&long, 50);
        assert_eq!(preview.chars().count(), 50);
        assert!(preview.ends_with('…'));
    }
}
