use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_to_relay_without_key() {
    let cfg = ChatbotConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg.mode, ChatbotMode::Relay);
    assert_eq!(cfg.base_url, DEFAULT_CHATBOT_BASE_URL);
    assert_eq!(cfg.api_key, None);
    assert_eq!(cfg.model, DEFAULT_CHATBOT_MODEL);
    assert_eq!(cfg.max_tokens, DEFAULT_CHATBOT_MAX_TOKENS);
    assert_eq!(
        cfg.timeouts,
        ChatbotTimeouts {
            request_secs: DEFAULT_CHATBOT_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_CHATBOT_CONNECT_TIMEOUT_SECS
        }
    );
}

#[test]
fn parses_chat_completions_overrides() {
    let cfg = ChatbotConfig::from_lookup(lookup_from(&[
        ("CHATBOT_MODE", "chat_completions"),
        ("CHATBOT_API_KEY_ENV", "OPENAI_API_KEY"),
        ("OPENAI_API_KEY", "sk-test"),
        ("CHATBOT_BASE_URL", "https://example.test/v1/"),
        ("CHATBOT_MODEL", "gpt-4o"),
        ("CHATBOT_MAX_TOKENS", "256"),
        ("CHATBOT_REQUEST_TIMEOUT_SECS", "42"),
        ("CHATBOT_CONNECT_TIMEOUT_SECS", "7"),
    ]))
    .unwrap();
    assert_eq!(cfg.mode, ChatbotMode::ChatCompletions);
    assert_eq!(cfg.api_key.as_deref(), Some("sk-test"));
    assert_eq!(cfg.base_url, "https://example.test/v1");
    assert_eq!(cfg.model, "gpt-4o");
    assert_eq!(cfg.max_tokens, 256);
    assert_eq!(cfg.timeouts, ChatbotTimeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn unparsable_numbers_fall_back_to_defaults() {
    let cfg = ChatbotConfig::from_lookup(lookup_from(&[("CHATBOT_MAX_TOKENS", "lots")])).unwrap();
    assert_eq!(cfg.max_tokens, DEFAULT_CHATBOT_MAX_TOKENS);
}

#[test]
fn unknown_mode_errors() {
    let err = ChatbotConfig::from_lookup(lookup_from(&[("CHATBOT_MODE", "bad")]))
        .unwrap_err()
        .to_string();
    assert!(err.contains("unknown CHATBOT_MODE"));
}

#[test]
fn named_key_var_must_exist() {
    let err = ChatbotConfig::from_lookup(lookup_from(&[("CHATBOT_API_KEY_ENV", "MISSING_KEY")])).unwrap_err();
    assert!(matches!(err, ChatbotError::MissingApiKey { var } if var == "MISSING_KEY"));
}

#[test]
fn chat_completions_requires_key() {
    let err = ChatbotConfig::from_lookup(lookup_from(&[("CHATBOT_MODE", "chat_completions")])).unwrap_err();
    assert!(matches!(err, ChatbotError::MissingApiKey { var } if var == "CHATBOT_API_KEY_ENV"));
}
