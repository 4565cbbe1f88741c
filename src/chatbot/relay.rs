//! Relay wire format: the health backend's own chatbot endpoint.
//!
//! The request body is [`ChatbotRequest`] verbatim. Replies are usually
//! `{"response": "..."}`; older deployments answered `{"message": "..."}` or
//! a bare JSON string, and all three are accepted.

use serde_json::Value;

use super::types::ChatbotError;

pub(crate) const RELAY_PATH: &str = "/chatbot";

pub(crate) fn parse_relay_response(json_text: &str) -> Result<String, ChatbotError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| ChatbotError::ApiParse(e.to_string()))?;
    let text = match &root {
        Value::String(s) => Some(s.as_str()),
        Value::Object(obj) => obj
            .get("response")
            .or_else(|| obj.get("message"))
            .and_then(Value::as_str),
        _ => None,
    };
    match text {
        Some(t) if !t.trim().is_empty() => Ok(t.to_string()),
        Some(_) => Err(ChatbotError::ApiParse("relay: empty response text".to_string())),
        None => Err(ChatbotError::ApiParse("relay: missing response field".to_string())),
    }
}
