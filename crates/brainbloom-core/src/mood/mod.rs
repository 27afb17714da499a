//! Mood tracking domain module.
//!
//! Mood entries live beside the conversation log in the session store but
//! never interact with it.

mod model;

pub use model::{COMMON_TRIGGERS, MoodEntry, MoodScore, MoodSummary, extract_triggers};
