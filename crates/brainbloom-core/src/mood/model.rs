//! Mood entry domain model.

use crate::error::{BloomError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Words looked for in mood notes to tag likely triggers.
pub const COMMON_TRIGGERS: [&str; 6] =
    ["work", "family", "money", "health", "relationship", "sleep"];

/// An ordinal well-being rating from 1 (very low) to 5 (great).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MoodScore(u8);

impl MoodScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validates a raw score.
    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(BloomError::validation(format!(
                "Mood score must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Human-readable label for the score.
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Very Low",
            2 => "Low",
            3 => "Okay",
            4 => "Good",
            _ => "Great",
        }
    }
}

impl TryFrom<u8> for MoodScore {
    type Error = BloomError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<MoodScore> for u8 {
    fn from(score: MoodScore) -> Self {
        score.0
    }
}

/// A recorded mood check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub mood: MoodScore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Triggers mentioned in the notes; `None` when there are no notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<String>>,
}

impl MoodEntry {
    /// Creates an entry, trimming the notes and tagging triggers.
    pub fn new(mood: MoodScore, notes: Option<String>) -> Self {
        let notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let triggers = notes.as_deref().map(extract_triggers);

        Self {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            mood,
            notes,
            triggers,
        }
    }
}

/// Returns the common triggers mentioned in `notes`, in list order.
pub fn extract_triggers(notes: &str) -> Vec<String> {
    let lowered = notes.to_lowercase();
    COMMON_TRIGGERS
        .iter()
        .filter(|trigger| lowered.contains(*trigger))
        .map(|trigger| trigger.to_string())
        .collect()
}

/// Aggregate view over the mood log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodSummary {
    pub count: usize,
    /// Mean score, `None` while the log is empty
    pub average: Option<f64>,
}

impl MoodSummary {
    pub fn from_entries(entries: &[MoodEntry]) -> Self {
        let count = entries.len();
        let average = (count > 0).then(|| {
            let total: u32 = entries.iter().map(|e| u32::from(e.mood.value())).sum();
            f64::from(total) / count as f64
        });
        Self { count, average }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        assert!(MoodScore::new(0).is_err());
        assert!(MoodScore::new(6).is_err());
        assert_eq!(MoodScore::new(1).unwrap().label(), "Very Low");
        assert_eq!(MoodScore::new(5).unwrap().label(), "Great");
    }

    #[test]
    fn test_out_of_range_score_is_validation_error() {
        let err = MoodScore::new(9).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_score_deserialization_is_validated() {
        assert!(serde_json::from_str::<MoodScore>("3").is_ok());
        assert!(serde_json::from_str::<MoodScore>("7").is_err());
    }

    #[test]
    fn test_triggers_follow_list_order() {
        let triggers = extract_triggers("Bad SLEEP, then stress at Work");
        assert_eq!(triggers, vec!["work".to_string(), "sleep".to_string()]);
    }

    #[test]
    fn test_entry_without_notes_has_no_triggers() {
        let entry = MoodEntry::new(MoodScore::new(3).unwrap(), None);
        assert!(entry.notes.is_none());
        assert!(entry.triggers.is_none());

        let blank = MoodEntry::new(MoodScore::new(3).unwrap(), Some("   ".to_string()));
        assert!(blank.notes.is_none());
        assert!(blank.triggers.is_none());
    }

    #[test]
    fn test_entry_with_notes_without_triggers() {
        let entry = MoodEntry::new(MoodScore::new(4).unwrap(), Some(" went hiking ".to_string()));
        assert_eq!(entry.notes.as_deref(), Some("went hiking"));
        assert_eq!(entry.triggers, Some(vec![]));
    }

    #[test]
    fn test_summary_average() {
        let entries = vec![
            MoodEntry::new(MoodScore::new(2).unwrap(), None),
            MoodEntry::new(MoodScore::new(5).unwrap(), None),
        ];
        let summary = MoodSummary::from_entries(&entries);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.average, Some(3.5));
        assert_eq!(MoodSummary::from_entries(&[]).average, None);
    }
}
