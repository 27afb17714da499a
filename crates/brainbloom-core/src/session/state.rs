//! Session state and the reducer that mutates it.

use super::crisis::CrisisAlert;
use super::event::SessionEvent;
use super::message::Message;
use crate::mood::{MoodEntry, MoodSummary};
use serde::{Deserialize, Serialize};

/// A single state transition.
///
/// The store never touches [`SessionState`] fields directly; every change
/// goes through [`SessionState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Append a message to the log.
    AddMessage(Message),
    /// Set or clear the composing flag.
    SetComposing(bool),
    /// Replace (`Some`) or clear (`None`) the active crisis alert.
    SetCrisisAlert(Option<CrisisAlert>),
    /// Append a mood entry.
    AddMoodEntry(MoodEntry),
}

/// Conversation state for one user session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Append-only message log; insertion order is display order
    pub messages: Vec<Message>,
    /// True while an agent reply is in flight
    pub composing: bool,
    /// The one active crisis alert, if any
    pub crisis_alert: Option<CrisisAlert>,
    /// Append-only mood log, independent of `messages`
    pub moods: Vec<MoodEntry>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an action and returns the event describing the change, or
    /// `None` when the action left the state untouched.
    pub fn apply(&mut self, action: SessionAction) -> Option<SessionEvent> {
        match action {
            SessionAction::AddMessage(message) => {
                self.messages.push(message.clone());
                Some(SessionEvent::MessageAppended { message })
            }
            SessionAction::SetComposing(composing) => {
                if self.composing == composing {
                    return None;
                }
                self.composing = composing;
                Some(SessionEvent::ComposingChanged { composing })
            }
            SessionAction::SetCrisisAlert(Some(alert)) => {
                self.crisis_alert = Some(alert.clone());
                Some(SessionEvent::CrisisAlertRaised { alert })
            }
            SessionAction::SetCrisisAlert(None) => self
                .crisis_alert
                .take()
                .map(|alert| SessionEvent::CrisisAlertCleared { alert_id: alert.id }),
            SessionAction::AddMoodEntry(entry) => {
                self.moods.push(entry.clone());
                Some(SessionEvent::MoodRecorded { entry })
            }
        }
    }

    /// Summarises the mood log.
    pub fn mood_summary(&self) -> MoodSummary {
        MoodSummary::from_entries(&self.moods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::MoodScore;
    use crate::session::message::MessageKind;

    #[test]
    fn test_messages_keep_insertion_order_and_duplicates() {
        let mut state = SessionState::new();
        state.apply(SessionAction::AddMessage(Message::user("hi")));
        state.apply(SessionAction::AddMessage(Message::user("hi")));
        state.apply(SessionAction::AddMessage(Message::agent(
            "hello",
            MessageKind::Normal,
        )));

        let contents: Vec<_> = state.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["hi", "hi", "hello"]);
    }

    #[test]
    fn test_new_alert_replaces_existing() {
        let mut state = SessionState::new();
        let first = CrisisAlert::crisis_detected();
        let second = CrisisAlert::crisis_detected();

        state.apply(SessionAction::SetCrisisAlert(Some(first)));
        state.apply(SessionAction::SetCrisisAlert(Some(second.clone())));

        assert_eq!(state.crisis_alert, Some(second));
    }

    #[test]
    fn test_clearing_absent_alert_emits_nothing() {
        let mut state = SessionState::new();
        assert!(state.apply(SessionAction::SetCrisisAlert(None)).is_none());
    }

    #[test]
    fn test_composing_only_emits_on_change() {
        let mut state = SessionState::new();
        assert!(state.apply(SessionAction::SetComposing(false)).is_none());
        assert_eq!(
            state.apply(SessionAction::SetComposing(true)),
            Some(SessionEvent::ComposingChanged { composing: true })
        );
    }

    #[test]
    fn test_mood_entries_do_not_touch_messages() {
        let mut state = SessionState::new();
        let entry = MoodEntry::new(MoodScore::new(4).unwrap(), None);
        state.apply(SessionAction::AddMoodEntry(entry));

        assert!(state.messages.is_empty());
        assert_eq!(state.moods.len(), 1);
        assert_eq!(state.mood_summary().average, Some(4.0));
    }
}
