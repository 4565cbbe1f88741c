use mockito::Matcher;
use serde_json::json;

use super::config::{ChatbotConfig, ChatbotMode, ChatbotTimeouts};
use super::*;
use crate::model::{ApiTurn, ContextMode};

fn config(mode: ChatbotMode, base_url: String, api_key: Option<&str>) -> ChatbotConfig {
    ChatbotConfig {
        mode,
        base_url,
        api_key: api_key.map(str::to_owned),
        model: "gpt-4o-mini".into(),
        max_tokens: 128,
        timeouts: ChatbotTimeouts { request_secs: 5, connect_secs: 5 },
    }
}

fn request() -> ChatbotRequest {
    ChatbotRequest {
        query: "How long should I take this?".into(),
        context_type: ContextMode::Prescription,
        messages: vec![ApiTurn::system("be helpful"), ApiTurn::user("How long should I take this?")],
    }
}

// =========================================================================
// relay mode
// =========================================================================

#[tokio::test]
async fn relay_posts_request_and_reads_response() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chatbot")
        .match_body(Matcher::PartialJson(json!({
            "query": "How long should I take this?",
            "contextType": "prescription",
            "messages": [
                { "role": "system", "content": "be helpful" },
                { "role": "user", "content": "How long should I take this?" }
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "response": "Take it for 7 days." }).to_string())
        .create_async()
        .await;

    let bot = HttpChatbot::from_config(config(ChatbotMode::Relay, server.url(), None)).unwrap();
    let reply = bot.get_response(&request()).await.unwrap();

    assert_eq!(reply, "Take it for 7 days.");
    mock.assert_async().await;
}

#[tokio::test]
async fn relay_non_success_status_is_api_response_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chatbot")
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;

    let bot = HttpChatbot::from_config(config(ChatbotMode::Relay, server.url(), None)).unwrap();
    let err = bot.get_response(&request()).await.unwrap_err();

    assert!(matches!(err, ChatbotError::ApiResponse { status: 503, ref body } if body == "unavailable"));
}

#[tokio::test]
async fn unreachable_host_is_api_request_error() {
    let bot = HttpChatbot::from_config(config(ChatbotMode::Relay, "http://127.0.0.1:1".into(), None)).unwrap();
    let err = bot.get_response(&request()).await.unwrap_err();
    assert!(matches!(err, ChatbotError::ApiRequest(_)));
}

// =========================================================================
// chat completions mode
// =========================================================================

#[tokio::test]
async fn chat_completions_sends_bearer_and_model() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 128,
            "messages": [
                { "role": "system", "content": "be helpful" },
                { "role": "user", "content": "How long should I take this?" }
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{ "message": { "role": "assistant", "content": "Seven days." } }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let bot = HttpChatbot::from_config(config(ChatbotMode::ChatCompletions, server.url(), Some("sk-test"))).unwrap();
    assert_eq!(bot.mode(), ChatbotMode::ChatCompletions);
    let reply = bot.get_response(&request()).await.unwrap();

    assert_eq!(reply, "Seven days.");
    mock.assert_async().await;
}
