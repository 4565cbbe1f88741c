//! Chatbot: HTTP client for the remote health assistant API.
//!
//! DESIGN
//! ======
//! The conversation manager only sees the [`ChatbotApi`] trait. `HttpChatbot`
//! is the production implementation and dispatches on [`ChatbotMode`]: the
//! relay mode posts the request to the health backend unchanged, while the
//! chat-completions mode talks to an OpenAI-compatible endpoint directly.

pub mod config;
mod openai;
mod relay;
pub mod types;

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use config::{ChatbotConfig, ChatbotMode};
pub use types::{ChatbotApi, ChatbotError, ChatbotRequest};

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// Chatbot client backed by `reqwest`. Configured by [`ChatbotConfig`].
pub struct HttpChatbot {
    http: reqwest::Client,
    mode: ChatbotMode,
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

impl HttpChatbot {
    /// Build a chatbot client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the HTTP client fails.
    pub fn from_env() -> Result<Self, ChatbotError> {
        Self::from_config(ChatbotConfig::from_env()?)
    }

    /// Build a chatbot client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: ChatbotConfig) -> Result<Self, ChatbotError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ChatbotError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            mode: config.mode,
            base_url: config.base_url,
            api_key: config.api_key,
            model: config.model,
            max_tokens: config.max_tokens,
        })
    }

    #[must_use]
    pub fn mode(&self) -> ChatbotMode {
        self.mode
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, ChatbotError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.post(url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ChatbotError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ChatbotError::ApiRequest(e.to_string()))?;
        if status != 200 {
            warn!(status, path, "chatbot: non-success response");
            return Err(ChatbotError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl ChatbotApi for HttpChatbot {
    async fn get_response(&self, request: &ChatbotRequest) -> Result<String, ChatbotError> {
        debug!(mode = ?self.mode, turns = request.messages.len(), context = %request.context_type, "chatbot: request");
        match self.mode {
            ChatbotMode::Relay => {
                let text = self.send_json(relay::RELAY_PATH, request).await?;
                relay::parse_relay_response(&text)
            }
            ChatbotMode::ChatCompletions => {
                let body = openai::build_request(&self.model, self.max_tokens, &request.messages);
                let text = self
                    .send_json(openai::CHAT_COMPLETIONS_PATH, &body)
                    .await?;
                openai::parse_chat_completions_response(&text)
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
