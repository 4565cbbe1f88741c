//! Front-end settings that sit outside the chatbot client.

use std::path::PathBuf;
use std::time::Duration;

use crate::chatbot::config::parse_or;
use crate::conversation::DEFAULT_GUEST_DELAY;

/// Directory name appended to the platform data dir.
pub const STORAGE_DIR_NAME: &str = "healiofy";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    /// Wait before the canned reply for unauthenticated users.
    pub guest_delay: Duration,
    /// Where the file store keeps the conversation blobs.
    pub storage_dir: PathBuf,
}

impl AssistantConfig {
    /// Optional:
    /// - `ASSISTANT_GUEST_DELAY_MS`: default 1000
    /// - `ASSISTANT_STORAGE_DIR`: default `<data dir>/healiofy`, or
    ///   `./.healiofy` when the platform has no data dir
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_ms = u64::try_from(DEFAULT_GUEST_DELAY.as_millis()).unwrap_or(1000);
        let guest_delay = Duration::from_millis(parse_or(&lookup, "ASSISTANT_GUEST_DELAY_MS", default_ms));
        let storage_dir = lookup("ASSISTANT_STORAGE_DIR")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(default_storage_dir, PathBuf::from);
        Self { guest_delay, storage_dir }
    }
}

#[must_use]
pub fn default_storage_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".healiofy"), |dir| dir.join(STORAGE_DIR_NAME))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
