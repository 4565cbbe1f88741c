//! Canned assistant texts and the system-preamble rule.

use crate::model::{ContextMode, PrescriptionAnalysis};

pub const BASE_INSTRUCTION: &str = "You are a helpful AI Health Assistant that provides information about \
prescriptions and general health topics. Be concise, accurate, and helpful.";

pub const GREETING: &str = "I'm your AI Health Assistant. I can answer questions about your prescription or \
general health topics. How can I help you today?";

pub const GUEST_REPLY: &str = "Please log in to use the full features of the health assistant.";

pub const APOLOGY: &str = "Sorry, I'm having trouble responding right now. Please try again later.";

/// Fixed-shape summary of a prescription for the system turn.
///
/// Only duration fields are filled in. Precaution and warning categories are
/// named as topics, never expanded into their list contents.
#[must_use]
pub fn prescription_summary(prescription: &PrescriptionAnalysis) -> String {
    let duration = &prescription.duration;
    let days = duration
        .days()
        .map_or_else(|| "unspecified".to_string(), |d| d.to_string());
    format!(
        "The user has a prescription with information about: Duration ({days} days, {}, {}), \
         Precautions (dietary restrictions, activity limitations, side effects), \
         and Warnings (drug interactions, contraindications). \
         Please consider this context when answering their questions.",
        duration.frequency, duration.timing
    )
}

/// System turn content for the given settings.
///
/// Enriched only when linking is on, the mode is prescription, and analysis
/// data exists; otherwise the base instruction alone.
#[must_use]
pub fn system_preamble(linked: bool, mode: ContextMode, prescription: Option<&PrescriptionAnalysis>) -> String {
    match prescription {
        Some(p) if linked && mode == ContextMode::Prescription => {
            format!("{BASE_INSTRUCTION} {}", prescription_summary(p))
        }
        _ => BASE_INSTRUCTION.to_string(),
    }
}

#[cfg(test)]
#[path = "preamble_test.rs"]
mod preamble_test;
