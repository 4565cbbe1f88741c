//! Conversation state and its synchronous transitions.
//!
//! `ConversationManager` wraps this in a lock and adds persistence and I/O;
//! everything here is pure so the sequencing rules can be tested directly.

use super::preamble::{GREETING, system_preamble};
use crate::model::{ApiTurn, ContextMode, DisplayMessage, PrescriptionAnalysis, Role};

/// Transcript, API history, and the settings that shape the system turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversationState {
    pub(crate) messages: Vec<DisplayMessage>,
    pub(crate) history: Vec<ApiTurn>,
    pub(crate) mode: ContextMode,
    pub(crate) linked: bool,
    pub(crate) authenticated: bool,
    pub(crate) prescription: Option<PrescriptionAnalysis>,
    /// Submissions awaiting a reply (API or guest delay).
    pub(crate) pending: usize,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new(default_messages(ContextMode::default()), default_history(), ContextMode::default())
    }
}

impl ConversationState {
    /// Assemble state from restored pieces. Linking starts enabled.
    #[must_use]
    pub fn new(messages: Vec<DisplayMessage>, history: Vec<ApiTurn>, mode: ContextMode) -> Self {
        let mut state = Self {
            messages,
            history,
            mode,
            linked: true,
            authenticated: false,
            prescription: None,
            pending: 0,
        };
        state.ensure_system_turn();
        state
    }

    /// True when the system turn should carry the prescription summary.
    #[must_use]
    pub fn prescription_context_active(&self) -> bool {
        self.linked && self.mode == ContextMode::Prescription && self.prescription.is_some()
    }

    #[must_use]
    pub fn preamble(&self) -> String {
        system_preamble(self.linked, self.mode, self.prescription.as_ref())
    }

    /// Replace the system turn with the preamble for the current settings.
    pub fn refresh_preamble(&mut self) {
        self.set_system_turn(self.preamble());
    }

    pub fn set_system_turn(&mut self, content: String) {
        self.ensure_system_turn();
        self.history[0].content = content;
    }

    /// Copy of the history with the system turn refreshed. State is untouched.
    #[must_use]
    pub fn history_with_preamble(&self) -> Vec<ApiTurn> {
        let mut history = self.history.clone();
        match history.first_mut() {
            Some(first) if first.role == Role::System => first.content = self.preamble(),
            _ => history.insert(0, ApiTurn::system(self.preamble())),
        }
        history
    }

    pub fn push_user(&mut self, text: &str) {
        self.messages.push(DisplayMessage::user(text, self.mode));
        self.history.push(ApiTurn::user(text));
    }

    /// Append an assistant reply tagged with the mode it was asked in.
    pub fn push_assistant(&mut self, text: &str, mode: ContextMode) {
        self.messages.push(DisplayMessage::assistant(text, mode));
        self.history.push(ApiTurn::assistant(text));
    }

    /// Back to a single greeting, keeping mode, linking, and prescription data.
    pub fn reset(&mut self) {
        self.messages = default_messages(self.mode);
        self.history = vec![ApiTurn::system(self.preamble()), ApiTurn::assistant(GREETING)];
    }

    fn ensure_system_turn(&mut self) {
        if self.history.first().map(|t| t.role) != Some(Role::System) {
            self.history.insert(0, ApiTurn::system(self.preamble()));
        }
    }
}

#[must_use]
pub fn default_messages(mode: ContextMode) -> Vec<DisplayMessage> {
    vec![DisplayMessage::assistant(GREETING, mode)]
}

#[must_use]
pub fn default_history() -> Vec<ApiTurn> {
    vec![ApiTurn::system(super::preamble::BASE_INSTRUCTION), ApiTurn::assistant(GREETING)]
}

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;
