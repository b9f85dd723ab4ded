//! Wire shapes for the chat and similarity endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::GatewayError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct EndpointError {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawChatResponse {
    Failed { error: EndpointError },
    Answered { choices: Vec<Choice> },
}

/// Pull the first choice's content out of a chat response, or turn an
/// `{error: {message}}` body into [`GatewayError::Endpoint`].
pub fn parse_chat_response(value: Value) -> Result<String, GatewayError> {
    let raw: RawChatResponse = serde_json::from_value(value)
        .map_err(|e| GatewayError::Malformed(format!("chat response: {e}")))?;
    match raw {
        RawChatResponse::Failed { error } => Err(GatewayError::Endpoint(
            error.message.unwrap_or_else(|| "unknown error".to_string()),
        )),
        RawChatResponse::Answered { choices } => choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::Malformed("chat response has no choices".to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityRequest {
    pub docs: Vec<String>,
    pub topics: Vec<String>,
}

/// `similarity[i][j]` scores document `i` against topic `j`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimilarityResponse {
    pub similarity: Vec<Vec<f64>>,
    #[serde(default)]
    pub tokens: Option<Value>,
}

impl SimilarityResponse {
    pub fn parse(value: Value) -> Result<Self, GatewayError> {
        if let Some(message) = value.get("error").map(error_message) {
            return Err(GatewayError::Endpoint(message));
        }
        serde_json::from_value(value)
            .map_err(|e| GatewayError::Malformed(format!("similarity response: {e}")))
    }
}

fn error_message(error: &Value) -> String {
    error
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| error.as_str())
        .unwrap_or("unknown error")
        .to_string()
}
