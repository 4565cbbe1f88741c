//! Presentation data around the chat: suggested questions, side panel, labels.
//!
//! DESIGN
//! ======
//! Front ends render these however they like. Nothing here knows about
//! layout; it only decides *what* each mode shows.

use crate::model::{ContextMode, PrescriptionAnalysis};

pub const PRESCRIPTION_QUESTIONS: [&str; 5] = [
    "What are the main side effects I should watch for?",
    "Can I take this medication with food?",
    "What should I do if I miss a dose?",
    "Are there any medications I should avoid?",
    "How long should I take this medication?",
];

pub const GENERAL_QUESTIONS: [&str; 5] = [
    "What are some tips for better sleep?",
    "How can I maintain a healthy diet?",
    "What exercises are good for heart health?",
    "How can I reduce stress naturally?",
    "What are common symptoms of dehydration?",
];

pub const HEALTH_TOPICS: [&str; 6] = ["Nutrition", "Exercise", "Sleep", "Stress", "Mental Health", "Preventive Care"];

pub const QUICK_TIPS: [&str; 4] = [
    "Stay hydrated with at least 8 glasses of water daily",
    "Aim for 7-9 hours of quality sleep each night",
    "Include at least 30 minutes of physical activity daily",
    "Practice mindfulness for 10 minutes each day",
];

pub const COMMON_QUESTIONS: [&str; 4] =
    ["Diet recommendations", "Exercise routines", "Sleep improvement", "Stress management"];

pub const NO_PRESCRIPTION_NOTICE: &str =
    "No prescription analyzed yet. Please submit your prescription for analysis first.";

#[must_use]
pub fn suggested_questions(mode: ContextMode) -> &'static [&'static str] {
    match mode {
        ContextMode::Prescription => &PRESCRIPTION_QUESTIONS,
        ContextMode::General => &GENERAL_QUESTIONS,
    }
}

// =============================================================================
// SIDE PANEL
// =============================================================================

/// Condensed view of an analysis for the prescription side panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrescriptionPanel {
    /// `"N days"` or `"Not specified"`.
    pub duration: String,
    pub frequency: String,
    pub timing: String,
    /// Up to two dietary restrictions then one activity limitation.
    pub key_precautions: Vec<String>,
    /// Up to two drug interactions then one contraindication.
    pub important_warnings: Vec<String>,
    /// Up to four side effects.
    pub side_effects: Vec<String>,
}

impl PrescriptionPanel {
    #[must_use]
    pub fn from_analysis(analysis: &PrescriptionAnalysis) -> Self {
        let duration = analysis
            .duration
            .days()
            .map_or_else(|| "Not specified".to_string(), |d| format!("{d} days"));
        Self {
            duration,
            frequency: analysis.duration.frequency.clone(),
            timing: analysis.duration.timing.clone(),
            key_precautions: take_each(&[
                (&analysis.precautions.dietary_restrictions, 2),
                (&analysis.precautions.activity_limitations, 1),
            ]),
            important_warnings: take_each(&[
                (&analysis.warnings.drug_interactions, 2),
                (&analysis.warnings.contraindications, 1),
            ]),
            side_effects: take_each(&[(&analysis.precautions.side_effects, 4)]),
        }
    }
}

fn take_each(sources: &[(&Vec<String>, usize)]) -> Vec<String> {
    sources
        .iter()
        .flat_map(|(items, n)| items.iter().take(*n).cloned())
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidePanel {
    /// `None` when no analysis is available yet.
    Prescription(Option<PrescriptionPanel>),
    General,
}

impl SidePanel {
    #[must_use]
    pub fn for_mode(mode: ContextMode, prescription: Option<&PrescriptionAnalysis>) -> Self {
        match mode {
            ContextMode::Prescription => Self::Prescription(prescription.map(PrescriptionPanel::from_analysis)),
            ContextMode::General => Self::General,
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Prescription(_) => "Prescription Summary",
            Self::General => "Health Resources",
        }
    }

    /// Plain-text rendering, one entry per line.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![self.title().to_string()];
        match self {
            Self::Prescription(None) => lines.push(NO_PRESCRIPTION_NOTICE.to_string()),
            Self::Prescription(Some(p)) => {
                lines.push("Duration & Timing".into());
                lines.push(format!("  Duration: {}", p.duration));
                lines.push(format!("  Frequency: {}", p.frequency));
                lines.push(format!("  Timing: {}", p.timing));
                push_section(&mut lines, "Key Precautions", &p.key_precautions);
                push_section(&mut lines, "Important Warnings", &p.important_warnings);
                push_section(&mut lines, "Side Effects to Monitor", &p.side_effects);
            }
            Self::General => {
                lines.push(format!("Health Topics: {}", HEALTH_TOPICS.join(", ")));
                push_section(&mut lines, "Quick Health Tips", &QUICK_TIPS);
                push_section(&mut lines, "Common Questions (try asking about)", &COMMON_QUESTIONS);
            }
        }
        lines
    }
}

fn push_section<S: AsRef<str>>(lines: &mut Vec<String>, heading: &str, items: &[S]) {
    lines.push(heading.to_string());
    lines.extend(items.iter().map(|item| format!("  - {}", item.as_ref())));
}

// =============================================================================
// LABELS
// =============================================================================

#[must_use]
pub fn status_line(mode: ContextMode) -> &'static str {
    match mode {
        ContextMode::Prescription => "Currently focusing on your prescription",
        ContextMode::General => "Answering general health questions",
    }
}

#[must_use]
pub fn mode_label(mode: ContextMode) -> &'static str {
    match mode {
        ContextMode::Prescription => "Prescription Mode",
        ContextMode::General => "General Health Mode",
    }
}

#[must_use]
pub fn link_label(linked: bool) -> &'static str {
    if linked { "Linked to Analysis" } else { "Not Linked to Analysis" }
}

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;
