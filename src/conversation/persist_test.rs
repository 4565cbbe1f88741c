use super::*;
use crate::conversation::preamble::GREETING;
use crate::storage::MemoryStore;

// =============================================================
// Defaults and fallbacks
// =============================================================

#[test]
fn empty_store_yields_defaults() {
    let store = MemoryStore::new();
    let messages = load_messages(&store);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, GREETING);
    assert_eq!(load_history(&store), default_history());
    assert_eq!(load_mode(&store), ContextMode::Prescription);
}

#[test]
fn malformed_blobs_fall_back_independently() {
    let store = MemoryStore::new();
    store.set(MESSAGES_KEY, "{not json").unwrap();
    store
        .set(HISTORY_KEY, r#"[{"role":"system","content":"custom"},{"role":"user","content":"hi"}]"#)
        .unwrap();
    store.set(CONTEXT_KEY, "sideways").unwrap();

    assert_eq!(load_messages(&store).len(), 1);
    assert_eq!(load_history(&store)[0].content, "custom");
    assert_eq!(load_mode(&store), ContextMode::Prescription);
}

#[test]
fn history_without_leading_system_turn_is_rejected() {
    let store = MemoryStore::new();
    store.set(HISTORY_KEY, r#"[{"role":"user","content":"hi"}]"#).unwrap();
    assert_eq!(load_history(&store), default_history());

    store.set(HISTORY_KEY, "[]").unwrap();
    assert_eq!(load_history(&store), default_history());
}

#[test]
fn messages_with_wrong_field_types_are_rejected() {
    let store = MemoryStore::new();
    store
        .set(MESSAGES_KEY, r#"[{"text":"x","isUser":"yes","timestamp":"2024-01-01T00:00:00Z","contextType":"general"}]"#)
        .unwrap();
    assert_eq!(load_messages(&store)[0].text, GREETING);
}

// =============================================================
// Round trip through storage
// =============================================================

#[test]
fn saved_state_restores() {
    let store = MemoryStore::new();
    let messages = vec![
        DisplayMessage::assistant(GREETING, ContextMode::General),
        DisplayMessage::user("How can I sleep better?", ContextMode::General),
    ];
    let history = vec![ApiTurn::system("sys"), ApiTurn::user("How can I sleep better?")];

    save_messages(&store, &messages);
    save_history(&store, &history);
    save_mode(&store, ContextMode::General);

    assert_eq!(load_messages(&store), messages);
    assert_eq!(load_history(&store), history);
    assert_eq!(store.get(CONTEXT_KEY).unwrap().as_deref(), Some("general"));
    assert_eq!(load_mode(&store), ContextMode::General);
}
