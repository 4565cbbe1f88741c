//! Conversation: the health chat's state machine, persistence, and API calls.
//!
//! DESIGN
//! ======
//! `ConversationManager` owns a [`ConversationState`] behind a tokio `RwLock`
//! plus the injected store, chatbot, and notifier. Every mutation of the
//! transcript, history, or mode is written back to the store before the lock
//! is released.
//!
//! SYSTEM CONTEXT
//! ==============
//! Front ends (the `healiofy-chat` binary, tests) drive the manager. The
//! lock is never held across the chatbot call or the guest delay, so a slow
//! reply does not block reads of the transcript.
//!
//! TRADE-OFFS
//! ==========
//! Overlapping submissions append their replies in completion order. A
//! guest reply racing a later authenticated submit can land after it.

pub mod persist;
pub mod preamble;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::chatbot::{ChatbotApi, ChatbotError, ChatbotRequest};
use crate::model::{ApiTurn, ContextMode, DisplayMessage, PrescriptionAnalysis};
use crate::notify::{Notification, Notifier};
use crate::panel::{self, SidePanel};
use crate::storage::KeyValueStore;
use preamble::{APOLOGY, GUEST_REPLY};
pub use state::ConversationState;

pub const DEFAULT_GUEST_DELAY: Duration = Duration::from_millis(1000);

const ERROR_FALLBACK: &str = "Failed to get a response from the chatbot. Please try again.";

/// What happened to one `submit` call.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Input was empty after trimming. Nothing changed.
    Ignored,
    /// Unauthenticated; the canned guest reply was appended.
    Guest,
    /// The chatbot replied with this text.
    Answered(String),
    /// The chatbot call failed; the apology was appended.
    Failed(ChatbotError),
}

pub struct ConversationManager {
    state: RwLock<ConversationState>,
    store: Arc<dyn KeyValueStore>,
    chatbot: Arc<dyn ChatbotApi>,
    notifier: Arc<dyn Notifier>,
    guest_delay: Duration,
}

impl ConversationManager {
    /// Restore persisted state from `store` and wire up collaborators.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, chatbot: Arc<dyn ChatbotApi>, notifier: Arc<dyn Notifier>) -> Self {
        let state = ConversationState::new(
            persist::load_messages(store.as_ref()),
            persist::load_history(store.as_ref()),
            persist::load_mode(store.as_ref()),
        );
        info!(
            messages = state.messages.len(),
            history = state.history.len(),
            mode = %state.mode,
            "conversation: restored"
        );
        Self { state: RwLock::new(state), store, chatbot, notifier, guest_delay: DEFAULT_GUEST_DELAY }
    }

    #[must_use]
    pub fn with_guest_delay(mut self, delay: Duration) -> Self {
        self.guest_delay = delay;
        self
    }

    // =========================================================================
    // SUBMIT
    // =========================================================================

    /// Send one user message and append the reply.
    ///
    /// The user turn is appended and persisted before any waiting. Failures
    /// of the chatbot call are reported through the notifier and never
    /// returned as `Err`.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let query = text.trim();
        if query.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let (mode, request) = {
            let mut state = self.state.write().await;
            state.push_user(query);
            state.pending += 1;
            let request = state.authenticated.then(|| ChatbotRequest {
                query: query.to_owned(),
                context_type: state.mode,
                messages: state.history_with_preamble(),
            });
            self.persist_transcript(&state);
            (state.mode, request)
        };

        let Some(request) = request else {
            info!(delay = ?self.guest_delay, "conversation: guest submit");
            tokio::time::sleep(self.guest_delay).await;
            self.finish(GUEST_REPLY, mode, None).await;
            return SubmitOutcome::Guest;
        };

        info!(mode = %mode, turns = request.messages.len(), "conversation: asking chatbot");
        match self.chatbot.get_response(&request).await {
            Ok(reply) => {
                let preamble = request.messages.first().map(|turn| turn.content.clone());
                self.finish(&reply, mode, preamble).await;
                SubmitOutcome::Answered(reply)
            }
            Err(e) => {
                warn!(error = %e, "conversation: chatbot call failed");
                let message = e.to_string();
                let description = if message.trim().is_empty() { ERROR_FALLBACK.to_owned() } else { message };
                self.notifier.notify(Notification::error("Error", description));
                self.finish(APOLOGY, mode, None).await;
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Append the reply. `preamble` is the system turn the call was made
    /// with; it is committed only for answered calls.
    async fn finish(&self, reply: &str, mode: ContextMode, preamble: Option<String>) {
        let mut state = self.state.write().await;
        if let Some(content) = preamble {
            state.set_system_turn(content);
        }
        state.push_assistant(reply, mode);
        state.pending = state.pending.saturating_sub(1);
        self.persist_transcript(&state);
    }

    // =========================================================================
    // SETTINGS
    // =========================================================================

    /// Flip the prescription link and return the new value.
    pub async fn toggle_context_link(&self) -> bool {
        let linked = {
            let mut state = self.state.write().await;
            state.linked = !state.linked;
            if state.linked && state.prescription_context_active() {
                state.refresh_preamble();
                persist::save_history(self.store.as_ref(), &state.history);
            }
            state.linked
        };
        info!(linked, "conversation: link toggled");
        let notification = if linked {
            Notification::info(
                "Analysis Link Enabled",
                "The chat assistant will now consider your prescription analysis when answering.",
            )
        } else {
            Notification::info(
                "Analysis Link Disabled",
                "The chat assistant is now independent from your prescription analysis.",
            )
        };
        self.notifier.notify(notification);
        linked
    }

    /// Clear the conversation down to a single greeting.
    pub async fn reset_conversation(&self) {
        {
            let mut state = self.state.write().await;
            state.reset();
            self.persist_transcript(&state);
            persist::save_mode(self.store.as_ref(), state.mode);
        }
        info!("conversation: reset");
        self.notifier.notify(Notification::info("Chat Reset", "Your conversation history has been cleared."));
    }

    /// Switch mode. The system turn is refreshed on the next submit.
    pub async fn set_context_mode(&self, mode: ContextMode) {
        let mut state = self.state.write().await;
        if state.mode != mode {
            info!(from = %state.mode, to = %mode, "conversation: mode changed");
        }
        state.mode = mode;
        persist::save_mode(self.store.as_ref(), mode);
    }

    pub async fn set_authenticated(&self, authenticated: bool) {
        self.state.write().await.authenticated = authenticated;
    }

    pub async fn set_prescription(&self, prescription: Option<PrescriptionAnalysis>) {
        self.state.write().await.prescription = prescription;
    }

    fn persist_transcript(&self, state: &ConversationState) {
        persist::save_messages(self.store.as_ref(), &state.messages);
        persist::save_history(self.store.as_ref(), &state.history);
    }

    // =========================================================================
    // READS
    // =========================================================================

    pub async fn messages(&self) -> Vec<DisplayMessage> {
        self.state.read().await.messages.clone()
    }

    pub async fn history(&self) -> Vec<ApiTurn> {
        self.state.read().await.history.clone()
    }

    pub async fn context_mode(&self) -> ContextMode {
        self.state.read().await.mode
    }

    pub async fn is_linked(&self) -> bool {
        self.state.read().await.linked
    }

    /// True while any submission is waiting on a reply.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.pending > 0
    }

    /// The link control is only offered in prescription mode with data present.
    pub async fn can_toggle_link(&self) -> bool {
        let state = self.state.read().await;
        state.mode == ContextMode::Prescription && state.prescription.is_some()
    }

    pub async fn suggested_questions(&self) -> &'static [&'static str] {
        panel::suggested_questions(self.context_mode().await)
    }

    /// Question text for the input field, or `None` if `index` is out of range.
    pub async fn select_suggestion(&self, index: usize) -> Option<&'static str> {
        self.suggested_questions().await.get(index).copied()
    }

    pub async fn side_panel(&self) -> SidePanel {
        let state = self.state.read().await;
        SidePanel::for_mode(state.mode, state.prescription.as_ref())
    }

    pub async fn status_line(&self) -> &'static str {
        panel::status_line(self.context_mode().await)
    }

    pub async fn mode_label(&self) -> &'static str {
        panel::mode_label(self.context_mode().await)
    }

    pub async fn link_label(&self) -> &'static str {
        panel::link_label(self.is_linked().await)
    }
}
