//! Type conversions between AWS Bedrock SDK and domain types

use advisor_application::BackendError;
use advisor_domain::{Capability, ContentBlock, Message, ModelReply, Role, StopReason, TokenUsage};
use aws_sdk_bedrockruntime::types as bedrock;
use aws_smithy_types::Document;

// ─── Bedrock → Domain ────────────────────────────────────────────

pub fn convert_stop_reason(reason: &bedrock::StopReason) -> StopReason {
    match reason {
        bedrock::StopReason::EndTurn => StopReason::EndTurn,
        bedrock::StopReason::ToolUse => StopReason::ToolUse,
        bedrock::StopReason::MaxTokens => StopReason::MaxTokens,
        other => StopReason::Other(other.as_str().to_string()),
    }
}

/// Returns `None` for block types the advisor doesn't use (images, guard content, ...)
pub fn convert_content_block(block: &bedrock::ContentBlock) -> Option<ContentBlock> {
    match block {
        bedrock::ContentBlock::Text(text) => Some(ContentBlock::text(text.clone())),
        bedrock::ContentBlock::ToolUse(tool_use) => Some(ContentBlock::ToolUse {
            id: tool_use.tool_use_id().to_string(),
            name: tool_use.name().to_string(),
            input: document_to_json(tool_use.input()),
        }),
        _ => None,
    }
}

pub fn convert_usage(usage: Option<&bedrock::TokenUsage>) -> TokenUsage {
    usage
        .map(|u| TokenUsage {
            input_tokens: u.input_tokens().max(0) as u64,
            output_tokens: u.output_tokens().max(0) as u64,
        })
        .unwrap_or_default()
}

pub fn convert_converse_output(
    output: &bedrock::ConverseOutput,
    stop_reason: &bedrock::StopReason,
    usage: Option<&bedrock::TokenUsage>,
) -> Result<ModelReply, BackendError> {
    let bedrock::ConverseOutput::Message(message) = output else {
        return Err(BackendError::InvalidResponse(
            "Bedrock response carried no message".to_string(),
        ));
    };

    Ok(ModelReply {
        content: message
            .content()
            .iter()
            .filter_map(convert_content_block)
            .collect(),
        stop_reason: convert_stop_reason(stop_reason),
        usage: convert_usage(usage),
    })
}

// ─── Domain → Bedrock ────────────────────────────────────────────

fn build_error(what: &str, e: impl std::fmt::Display) -> BackendError {
    BackendError::Other(format!("Failed to build {what}: {e}"))
}

pub fn convert_block(block: &ContentBlock) -> Result<bedrock::ContentBlock, BackendError> {
    Ok(match block {
        ContentBlock::Text { text } => bedrock::ContentBlock::Text(text.clone()),
        ContentBlock::ToolUse { id, name, input } => bedrock::ContentBlock::ToolUse(
            bedrock::ToolUseBlock::builder()
                .tool_use_id(id)
                .name(name)
                .input(json_to_document(input))
                .build()
                .map_err(|e| build_error("tool use block", e))?,
        ),
        ContentBlock::ToolResult {
            tool_use_id,
            output,
            is_error,
        } => {
            let status = if *is_error {
                bedrock::ToolResultStatus::Error
            } else {
                bedrock::ToolResultStatus::Success
            };
            bedrock::ContentBlock::ToolResult(
                bedrock::ToolResultBlock::builder()
                    .tool_use_id(tool_use_id)
                    .status(status)
                    .content(bedrock::ToolResultContentBlock::Text(output.clone()))
                    .build()
                    .map_err(|e| build_error("tool result block", e))?,
            )
        }
    })
}

pub fn convert_message(message: &Message) -> Result<bedrock::Message, BackendError> {
    let role = match message.role {
        Role::User => bedrock::ConversationRole::User,
        Role::Assistant => bedrock::ConversationRole::Assistant,
    };
    let content = message
        .content
        .iter()
        .map(convert_block)
        .collect::<Result<Vec<_>, _>>()?;

    bedrock::Message::builder()
        .role(role)
        .set_content(Some(content))
        .build()
        .map_err(|e| build_error("message", e))
}

pub fn convert_capability(capability: &Capability) -> Result<bedrock::Tool, BackendError> {
    let mut builder = bedrock::ToolSpecification::builder()
        .name(&capability.name)
        .input_schema(bedrock::ToolInputSchema::Json(json_to_document(
            &capability.input_schema,
        )));
    if let Some(desc) = &capability.description {
        builder = builder.description(desc);
    }
    let spec = builder
        .build()
        .map_err(|e| build_error("tool specification", e))?;
    Ok(bedrock::Tool::ToolSpec(spec))
}

/// `None` when there are no tools; Bedrock rejects an empty tool list
pub fn convert_tool_config(
    capabilities: &[Capability],
) -> Result<Option<bedrock::ToolConfiguration>, BackendError> {
    if capabilities.is_empty() {
        return Ok(None);
    }
    let tools = capabilities
        .iter()
        .map(convert_capability)
        .collect::<Result<Vec<_>, _>>()?;

    bedrock::ToolConfiguration::builder()
        .set_tools(Some(tools))
        .build()
        .map(Some)
        .map_err(|e| build_error("tool config", e))
}

// ─── JSON ↔ Document helpers ─────────────────────────────────────

pub fn json_to_document(value: &serde_json::Value) -> Document {
    match value {
        serde_json::Value::Null => Document::Null,
        serde_json::Value::Bool(b) => Document::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Document::Number(aws_smithy_types::Number::PosInt(u))
            } else if let Some(i) = n.as_i64() {
                Document::Number(aws_smithy_types::Number::NegInt(i))
            } else if let Some(f) = n.as_f64() {
                Document::Number(aws_smithy_types::Number::Float(f))
            } else {
                Document::Null
            }
        }
        serde_json::Value::String(s) => Document::String(s.clone()),
        serde_json::Value::Array(arr) => {
            Document::Array(arr.iter().map(json_to_document).collect())
        }
        serde_json::Value::Object(map) => Document::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_document(v)))
                .collect(),
        ),
    }
}

pub fn document_to_json(doc: &Document) -> serde_json::Value {
    match doc {
        Document::Null => serde_json::Value::Null,
        Document::Bool(b) => serde_json::Value::Bool(*b),
        Document::Number(n) => match n {
            aws_smithy_types::Number::PosInt(i) => serde_json::json!(*i),
            aws_smithy_types::Number::NegInt(i) => serde_json::json!(*i),
            aws_smithy_types::Number::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        },
        Document::String(s) => serde_json::Value::String(s.clone()),
        Document::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(document_to_json).collect())
        }
        Document::Object(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), document_to_json(v)))
                .collect(),
        ),
    }
}

pub fn convert_converse_error(
    err: &aws_sdk_bedrockruntime::error::SdkError<
        aws_sdk_bedrockruntime::operation::converse::ConverseError,
    >,
) -> BackendError {
    use aws_sdk_bedrockruntime::operation::converse::ConverseError;

    match err {
        aws_sdk_bedrockruntime::error::SdkError::ServiceError(service_err) => {
            match service_err.err() {
                ConverseError::ThrottlingException(e) => {
                    BackendError::RequestFailed(format!("Bedrock throttled: {}", e))
                }
                ConverseError::AccessDeniedException(e) => {
                    BackendError::RequestFailed(format!("Bedrock access denied: {}", e))
                }
                ConverseError::ModelNotReadyException(e) => {
                    BackendError::RequestFailed(format!("Bedrock model not ready: {}", e))
                }
                ConverseError::ValidationException(e) => {
                    BackendError::RequestFailed(format!("Bedrock validation error: {}", e))
                }
                ConverseError::ModelTimeoutException(e) => {
                    BackendError::RequestFailed(format!("Bedrock model timed out: {}", e))
                }
                other => BackendError::RequestFailed(format!("Bedrock error: {}", other)),
            }
        }
        other => BackendError::Connection(format!("Bedrock SDK error: {}", other)),
    }
}
