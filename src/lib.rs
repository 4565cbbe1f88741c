//! Healiofy health assistant: conversation state, chatbot client, and
//! response formatting for the prescription-aware health chat.
//!
//! The [`conversation::ConversationManager`] is the entry point. It is
//! constructed with a [`storage::KeyValueStore`], a [`chatbot::ChatbotApi`],
//! and a [`notify::Notifier`], all injected.

pub mod chatbot;
pub mod config;
pub mod conversation;
pub mod format;
pub mod model;
pub mod notify;
pub mod panel;
pub mod storage;
