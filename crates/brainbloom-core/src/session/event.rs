use serde::{Deserialize, Serialize};

use super::crisis::CrisisAlert;
use super::message::Message;
use crate::mood::MoodEntry;

/// Changes published by the session store to its subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A message was appended to the log.
    MessageAppended { message: Message },
    /// The agent started or stopped composing a reply.
    ComposingChanged { composing: bool },
    /// A crisis alert became active, replacing any previous one.
    CrisisAlertRaised { alert: CrisisAlert },
    /// The active crisis alert was dismissed.
    CrisisAlertCleared { alert_id: String },
    /// A mood check-in was recorded.
    MoodRecorded { entry: MoodEntry },
}
