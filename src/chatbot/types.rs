//! Chatbot types: request shape, errors, and the provider-neutral trait.

use serde::Serialize;

use crate::model::{ApiTurn, ContextMode};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by chatbot client operations.
#[derive(Debug, thiserror::Error)]
pub enum ChatbotError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the chatbot service failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The chatbot service returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The response body could not be interpreted.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// REQUEST
// =============================================================================

/// One chatbot call: the literal question, the active mode, and the full history.
///
/// `messages` already ends with the user turn for `query` and starts with the
/// system preamble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotRequest {
    pub query: String,
    pub context_type: ContextMode,
    pub messages: Vec<ApiTurn>,
}

// =============================================================================
// CHATBOT TRAIT
// =============================================================================

/// Provider-neutral async trait for the chatbot. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ChatbotApi: Send + Sync {
    /// Ask the chatbot and return its reply text.
    ///
    /// # Errors
    ///
    /// Returns a [`ChatbotError`] if the request fails or the response is malformed.
    async fn get_response(&self, request: &ChatbotRequest) -> Result<String, ChatbotError>;
}
