//! Chatbot configuration parsed from environment variables.

use super::types::ChatbotError;

pub const DEFAULT_CHATBOT_BASE_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_CHATBOT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_CHATBOT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_CHATBOT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CHATBOT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatbotMode {
    /// Post the request as-is to the health backend's chatbot endpoint.
    Relay,
    /// Talk to an OpenAI-compatible `/chat/completions` endpoint directly.
    ChatCompletions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatbotTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatbotConfig {
    pub mode: ChatbotMode,
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub timeouts: ChatbotTimeouts,
}

impl ChatbotConfig {
    /// Build typed chatbot config from environment variables.
    ///
    /// Optional:
    /// - `CHATBOT_MODE`: `relay` (default) or `chat_completions`
    /// - `CHATBOT_BASE_URL`: default local backend URL
    /// - `CHATBOT_API_KEY_ENV`: names the env var containing the key
    ///   (required for `chat_completions`)
    /// - `CHATBOT_MODEL`: default `gpt-4o-mini`
    /// - `CHATBOT_MAX_TOKENS`: default 1024
    /// - `CHATBOT_REQUEST_TIMEOUT_SECS`: default 60
    /// - `CHATBOT_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown mode or a named key variable that is unset.
    pub fn from_env() -> Result<Self, ChatbotError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ChatbotConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`ChatbotConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ChatbotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = parse_mode(lookup("CHATBOT_MODE").as_deref())?;

        let api_key = match lookup("CHATBOT_API_KEY_ENV") {
            Some(key_var) => Some(lookup(&key_var).ok_or(ChatbotError::MissingApiKey { var: key_var })?),
            None if mode == ChatbotMode::ChatCompletions => {
                return Err(ChatbotError::MissingApiKey { var: "CHATBOT_API_KEY_ENV".into() });
            }
            None => None,
        };

        let base_url = lookup("CHATBOT_BASE_URL")
            .unwrap_or_else(|| DEFAULT_CHATBOT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let model = lookup("CHATBOT_MODEL").unwrap_or_else(|| DEFAULT_CHATBOT_MODEL.to_string());
        let max_tokens = parse_or(&lookup, "CHATBOT_MAX_TOKENS", DEFAULT_CHATBOT_MAX_TOKENS);
        let timeouts = ChatbotTimeouts {
            request_secs: parse_or(&lookup, "CHATBOT_REQUEST_TIMEOUT_SECS", DEFAULT_CHATBOT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_or(&lookup, "CHATBOT_CONNECT_TIMEOUT_SECS", DEFAULT_CHATBOT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { mode, base_url, api_key, model, max_tokens, timeouts })
    }
}

pub(crate) fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_mode(raw: Option<&str>) -> Result<ChatbotMode, ChatbotError> {
    match raw.unwrap_or("relay") {
        "relay" => Ok(ChatbotMode::Relay),
        "chat_completions" => Ok(ChatbotMode::ChatCompletions),
        other => Err(ChatbotError::ConfigParse(format!(
            "unknown CHATBOT_MODE '{other}' (expected 'relay' or 'chat_completions')"
        ))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
