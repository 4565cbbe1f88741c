//! Load/store of the three conversation blobs.
//!
//! TRADE-OFFS
//! ==========
//! Each key is restored on its own and falls back to its own default, so a
//! restored mode can disagree with a restored system turn. Writes re-serialize
//! the whole value every time; there is no batching.

use tracing::{error, warn};

use super::state::{default_history, default_messages};
use crate::model::{ApiTurn, ContextMode, DisplayMessage, Role};
use crate::storage::{KeyValueStore, StorageError, load_json, save_json};

pub const MESSAGES_KEY: &str = "healiofy_chat_messages";
pub const HISTORY_KEY: &str = "healiofy_chat_history";
pub const CONTEXT_KEY: &str = "healiofy_chat_context";

// =============================================================================
// LOAD
// =============================================================================

pub fn load_messages(store: &dyn KeyValueStore) -> Vec<DisplayMessage> {
    match load_json::<Vec<DisplayMessage>>(store, MESSAGES_KEY) {
        Some(messages) if !messages.is_empty() => messages,
        Some(_) => {
            warn!(key = MESSAGES_KEY, "persist: stored messages empty, using default");
            default_messages(ContextMode::Prescription)
        }
        None => default_messages(ContextMode::Prescription),
    }
}

/// Restore the API history. Anything not starting with a system turn is rejected.
pub fn load_history(store: &dyn KeyValueStore) -> Vec<ApiTurn> {
    match load_json::<Vec<ApiTurn>>(store, HISTORY_KEY) {
        Some(history) if history.first().is_some_and(|t| t.role == Role::System) => history,
        Some(_) => {
            warn!(key = HISTORY_KEY, "persist: stored history lacks leading system turn, using default");
            default_history()
        }
        None => default_history(),
    }
}

/// Restore the context mode. Stored as the bare word, not JSON.
pub fn load_mode(store: &dyn KeyValueStore) -> ContextMode {
    match store.get(CONTEXT_KEY) {
        Ok(Some(raw)) => raw.parse::<ContextMode>().unwrap_or_else(|e| {
            warn!(key = CONTEXT_KEY, error = %e, "persist: unknown stored mode, using default");
            ContextMode::default()
        }),
        Ok(None) => ContextMode::default(),
        Err(e) => {
            warn!(key = CONTEXT_KEY, error = %e, "persist: read failed, using default");
            ContextMode::default()
        }
    }
}

// =============================================================================
// SAVE
// =============================================================================

pub fn save_messages(store: &dyn KeyValueStore, messages: &[DisplayMessage]) {
    log_failure(MESSAGES_KEY, save_json(store, MESSAGES_KEY, &messages));
}

pub fn save_history(store: &dyn KeyValueStore, history: &[ApiTurn]) {
    log_failure(HISTORY_KEY, save_json(store, HISTORY_KEY, &history));
}

pub fn save_mode(store: &dyn KeyValueStore, mode: ContextMode) {
    log_failure(CONTEXT_KEY, store.set(CONTEXT_KEY, mode.as_str()));
}

fn log_failure(key: &str, result: Result<(), StorageError>) {
    if let Err(e) = result {
        error!(key, error = %e, "persist: write failed");
    }
}

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;
