//! Crisis classification and alert types.
//!
//! Classification is a plain case-insensitive substring test against a fixed
//! phrase list. There is no tokenization, stemming or negation handling, so
//! "I would never kill myself" is classified as a crisis too.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// Phrases whose presence in user text marks the reply as crisis-indicating.
pub const CRISIS_PHRASES: [&str; 5] = [
    "suicide",
    "kill myself",
    "end it all",
    "no point",
    "hurt myself",
];

/// Message shown with every crisis alert.
pub const CRISIS_ALERT_MESSAGE: &str =
    "Crisis indicators detected. Immediate support resources recommended.";

/// Suggested actions attached to every crisis alert, in display order.
pub const CRISIS_ALERT_ACTIONS: [&str; 3] = [
    "Call 988",
    "Contact Emergency Services",
    "Find Nearby Crisis Center",
];

/// Severity of a crisis alert.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CrisisLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// The single advisory surfaced when a reply is classified as a crisis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisAlert {
    pub id: String,
    pub level: CrisisLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Suggested action labels, in display order
    pub actions: Vec<String>,
}

impl CrisisAlert {
    /// Builds an alert with a fresh id and the current time.
    pub fn new(level: CrisisLevel, message: impl Into<String>, actions: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            level,
            message: message.into(),
            timestamp: Utc::now(),
            actions,
        }
    }

    /// The alert raised for crisis-classified text: level `high` with the
    /// fixed message and action list.
    pub fn crisis_detected() -> Self {
        Self::new(
            CrisisLevel::High,
            CRISIS_ALERT_MESSAGE,
            CRISIS_ALERT_ACTIONS.iter().map(|a| a.to_string()).collect(),
        )
    }
}

/// Result of classifying a piece of user text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classification {
    pub is_crisis: bool,
}

impl Classification {
    /// Builds the alert that goes with this classification, if any.
    pub fn alert(&self) -> Option<CrisisAlert> {
        self.is_crisis.then(CrisisAlert::crisis_detected)
    }
}

/// Crisis phrases contained in `text`, case-insensitively, in list order.
pub fn matched_phrases(text: &str) -> Vec<&'static str> {
    let lowered = text.to_lowercase();
    CRISIS_PHRASES
        .iter()
        .copied()
        .filter(|phrase| lowered.contains(phrase))
        .collect()
}

/// Classifies user text. Total and pure.
pub fn classify(text: &str) -> Classification {
    Classification {
        is_crisis: !matched_phrases(text).is_empty(),
    }
}
