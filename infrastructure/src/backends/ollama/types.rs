//! Ollama chat wire types and conversions to domain types

use advisor_domain::{
    Capability, ContentBlock, Message, ModelReply, Role, StopReason, TokenUsage,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
    pub keep_alive: String,
    pub options: ChatOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatOptions {
    pub temperature: f32,
    pub num_predict: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl ChatMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
            tool_calls: Vec::new(),
            tool_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub message: ChatMessage,
    #[serde(default)]
    pub done_reason: Option<String>,
    #[serde(default)]
    pub prompt_eval_count: u64,
    #[serde(default)]
    pub eval_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ─── Domain → Ollama ─────────────────────────────────────────────

pub fn convert_tools(capabilities: &[Capability]) -> Vec<ToolDefinition> {
    capabilities
        .iter()
        .map(|c| ToolDefinition {
            kind: "function",
            function: FunctionDefinition {
                name: c.name.clone(),
                description: c.description.clone().unwrap_or_default(),
                parameters: c.input_schema.clone(),
            },
        })
        .collect()
}

/// Flatten the history into Ollama's message list, system prompt first.
///
/// Ollama has no tool call ids, so tool results are matched back to the
/// tool name through the assistant turn that requested them.
pub fn convert_messages(system_prompt: &str, history: &[Message]) -> Vec<ChatMessage> {
    let mut out = vec![ChatMessage::new("system", system_prompt)];
    let mut tool_names: HashMap<&str, &str> = HashMap::new();

    for message in history {
        match message.role {
            Role::User => {
                let mut text = Vec::new();
                for block in &message.content {
                    match block {
                        ContentBlock::Text { text: t } => text.push(t.as_str()),
                        ContentBlock::ToolResult {
                            tool_use_id,
                            output,
                            ..
                        } => {
                            let mut tool = ChatMessage::new("tool", output.clone());
                            tool.tool_name = tool_names
                                .get(tool_use_id.as_str())
                                .map(|n| n.to_string());
                            out.push(tool);
                        }
                        ContentBlock::ToolUse { .. } => {}
                    }
                }
                if !text.is_empty() {
                    out.push(ChatMessage::new("user", text.join("")));
                }
            }
            Role::Assistant => {
                let mut assistant = ChatMessage::new("assistant", message.text_content());
                for block in &message.content {
                    if let Some((id, name, input)) = block.as_tool_use() {
                        tool_names.insert(id, name);
                        assistant.tool_calls.push(ToolCall {
                            function: FunctionCall {
                                name: name.to_string(),
                                arguments: input.clone(),
                            },
                        });
                    }
                }
                out.push(assistant);
            }
        }
    }
    out
}

// ─── Ollama → Domain ─────────────────────────────────────────────

pub fn convert_response(response: ChatResponse) -> ModelReply {
    let mut content = Vec::new();
    if !response.message.content.is_empty() {
        content.push(ContentBlock::text(response.message.content));
    }

    let has_tool_calls = !response.message.tool_calls.is_empty();
    for (i, call) in response.message.tool_calls.into_iter().enumerate() {
        let input = match call.function.arguments {
            Value::Null => Value::Object(Default::default()),
            // Some models return arguments as a JSON string
            Value::String(s) => serde_json::from_str(&s).unwrap_or(Value::String(s)),
            other => other,
        };
        content.push(ContentBlock::ToolUse {
            id: format!("call_{i}"),
            name: call.function.name,
            input,
        });
    }

    let stop_reason = if has_tool_calls {
        StopReason::ToolUse
    } else {
        match response.done_reason.as_deref() {
            Some("length") => StopReason::MaxTokens,
            Some("stop") | None => StopReason::EndTurn,
            Some(other) => StopReason::Other(other.to_string()),
        }
    };

    ModelReply {
        content,
        stop_reason,
        usage: TokenUsage {
            input_tokens: response.prompt_eval_count,
            output_tokens: response.eval_count,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_history_with_tool_round() {
        let history = vec![
            Message::user_text("Price of m5.large?"),
            Message::assistant(vec![ContentBlock::ToolUse {
                id: "call_0".into(),
                name: "get_pricing".into(),
                input: json!({"instance_type": "m5.large"}),
            }]),
            Message::tool_results(vec![ContentBlock::ToolResult {
                tool_use_id: "call_0".into(),
                output: "$0.096/hr".into(),
                is_error: false,
            }]),
        ];

        let messages = convert_messages("You are an AWS consultant.", &history);
        let roles: Vec<_> = messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "tool"]);
        assert_eq!(messages[2].tool_calls[0].function.name, "get_pricing");
        assert_eq!(messages[3].content, "$0.096/hr");
        assert_eq!(messages[3].tool_name.as_deref(), Some("get_pricing"));
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "qwen3:4b".into(),
            messages: convert_messages("sys", &[Message::user_text("hi")]),
            stream: false,
            tools: convert_tools(&[Capability::new("documentation", "search_documentation")
                .with_description("Search AWS docs")]),
            keep_alive: "10m".into(),
            options: ChatOptions {
                temperature: 0.1,
                num_predict: 20000,
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["stream"], false);
        assert_eq!(value["keep_alive"], "10m");
        assert_eq!(value["options"]["num_predict"], 20000);
        assert_eq!(value["tools"][0]["type"], "function");
        assert_eq!(value["tools"][0]["function"]["name"], "search_documentation");
        assert_eq!(value["messages"][0]["role"], "system");
        assert!(value["messages"][1].get("tool_calls").is_none());
    }

    #[test]
    fn test_no_tools_field_when_empty() {
        let request = ChatRequest {
            model: "m".into(),
            messages: vec![],
            stream: false,
            tools: vec![],
            keep_alive: "10m".into(),
            options: ChatOptions {
                temperature: 0.1,
                num_predict: 1,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
    }

    #[test]
    fn test_text_response() {
        let response: ChatResponse = serde_json::from_value(json!({
            "model": "qwen3:4b",
            "message": { "role": "assistant", "content": "Use Aurora Serverless." },
            "done": true,
            "done_reason": "stop",
            "prompt_eval_count": 812,
            "eval_count": 64
        }))
        .unwrap();

        let reply = convert_response(response);
        assert_eq!(reply.text_content(), "Use Aurora Serverless.");
        assert_eq!(reply.stop_reason, StopReason::EndTurn);
        assert_eq!(reply.usage.total(), 876);
    }

    #[test]
    fn test_tool_call_response() {
        let response: ChatResponse = serde_json::from_value(json!({
            "message": {
                "role": "assistant",
                "content": "",
                "tool_calls": [
                    { "function": { "name": "search_documentation", "arguments": { "search_phrase": "S3 lifecycle" } } },
                    { "function": { "name": "read_documentation", "arguments": "{\"url\": \"https://docs.aws.amazon.com\"}" } }
                ]
            },
            "done": true
        }))
        .unwrap();

        let reply = convert_response(response);
        assert_eq!(reply.stop_reason, StopReason::ToolUse);
        assert!(reply.has_tool_calls());
        let (id, name, input) = reply.content[0].as_tool_use().unwrap();
        assert_eq!((id, name), ("call_0", "search_documentation"));
        assert_eq!(input["search_phrase"], "S3 lifecycle");
        let (id, _, input) = reply.content[1].as_tool_use().unwrap();
        assert_eq!(id, "call_1");
        assert_eq!(input["url"], "https://docs.aws.amazon.com");
    }

    #[test]
    fn test_length_stop() {
        let response: ChatResponse = serde_json::from_value(json!({
            "message": { "role": "assistant", "content": "truncated" },
            "done_reason": "length"
        }))
        .unwrap();
        assert_eq!(convert_response(response).stop_reason, StopReason::MaxTokens);
    }
}
