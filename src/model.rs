//! Conversation data model shared by the state manager, storage, and chatbot client.
//!
//! DESIGN
//! ======
//! Two parallel sequences describe one conversation: `DisplayMessage` for the
//! chat transcript and `ApiTurn` for the history sent upstream. They carry the
//! same content but differ in shape: only the API history holds the system
//! preamble at index 0.
//!
//! Serialized field names match the browser storage layout (`isUser`,
//! `contextType`) so persisted blobs stay readable across front ends.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// CONTEXT MODE
// =============================================================================

/// Whether the assistant is scoped to the user's prescription or to general health.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextMode {
    #[default]
    Prescription,
    General,
}

impl ContextMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prescription => "prescription",
            Self::General => "general",
        }
    }

    /// The other mode. Mirrors the single prescription/general switch.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Prescription => Self::General,
            Self::General => Self::Prescription,
        }
    }
}

impl fmt::Display for ContextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored or user-supplied mode string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown context mode: {0}")]
pub struct UnknownContextMode(pub String);

impl FromStr for ContextMode {
    type Err = UnknownContextMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "prescription" => Ok(Self::Prescription),
            "general" => Ok(Self::General),
            other => Err(UnknownContextMode(other.to_owned())),
        }
    }
}

// =============================================================================
// DISPLAY MESSAGE
// =============================================================================

/// One entry in the visible chat transcript. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMessage {
    pub text: String,
    #[serde(rename = "isUser")]
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "contextType")]
    pub context_type: ContextMode,
}

impl DisplayMessage {
    #[must_use]
    pub fn user(text: impl Into<String>, context_type: ContextMode) -> Self {
        Self { text: text.into(), is_user: true, timestamp: Utc::now(), context_type }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>, context_type: ContextMode) -> Self {
        Self { text: text.into(), is_user: false, timestamp: Utc::now(), context_type }
    }

    /// Header line shown above a bubble, e.g. `You · 09:41`.
    #[must_use]
    pub fn header_label(&self) -> String {
        let who = if self.is_user { "You" } else { "Health Assistant" };
        let local = self.timestamp.with_timezone(&Local);
        format!("{who} · {}", local.format("%H:%M"))
    }
}

// =============================================================================
// API TURN
// =============================================================================

/// Speaker of an [`ApiTurn`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One turn of the history sent verbatim to the chatbot API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiTurn {
    pub role: Role,
    pub content: String,
}

impl ApiTurn {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

// =============================================================================
// PRESCRIPTION ANALYSIS
// =============================================================================

/// Output of the prescription analysis service. Read-only here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionAnalysis {
    pub duration: Duration,
    #[serde(default)]
    pub precautions: Precautions,
    #[serde(default)]
    pub warnings: Warnings,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    /// Absent or zero when the prescription does not state a course length.
    #[serde(default)]
    pub total_days: Option<u32>,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub timing: String,
}

impl Duration {
    /// Course length, treating zero like a missing value.
    #[must_use]
    pub fn days(&self) -> Option<u32> {
        self.total_days.filter(|d| *d > 0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precautions {
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub activity_limitations: Vec<String>,
    #[serde(default)]
    pub side_effects: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warnings {
    #[serde(default)]
    pub drug_interactions: Vec<String>,
    #[serde(default)]
    pub contraindications: Vec<String>,
}

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;
