//! OpenAI-compatible `/chat/completions` wire format.
//!
//! The API history already carries the system preamble at index 0, so turns
//! are mapped one-to-one with no separate `system` parameter.

use serde::Serialize;
use serde_json::Value;

use super::types::ChatbotError;
use crate::model::ApiTurn;

pub(crate) const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

#[derive(Serialize)]
pub(crate) struct CcRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<CcMessage<'a>>,
}

#[derive(Serialize)]
pub(crate) struct CcMessage<'a> {
    role: &'static str,
    content: &'a str,
}

pub(crate) fn build_request<'a>(model: &'a str, max_tokens: u32, turns: &'a [ApiTurn]) -> CcRequest<'a> {
    let messages = turns
        .iter()
        .map(|turn| CcMessage { role: turn.role.as_str(), content: &turn.content })
        .collect();
    CcRequest { model, max_tokens, messages }
}

pub(crate) fn parse_chat_completions_response(json_text: &str) -> Result<String, ChatbotError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| ChatbotError::ApiParse(e.to_string()))?;
    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(ChatbotError::ApiParse("chat_completions: missing choices[0]".to_string()));
    };
    match choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
    {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ChatbotError::ApiParse("chat_completions: empty message content".to_string())),
    }
}
