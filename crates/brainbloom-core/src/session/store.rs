use super::crisis::CrisisAlert;
use super::event::SessionEvent;
use super::message::Message;
use super::reply::{ReplyOutcome, ReplyService};
use super::state::{SessionAction, SessionState};
use crate::error::{BloomError, Result};
use crate::mood::{MoodEntry, MoodScore};
use std::sync::{Arc, RwLock, RwLockWriteGuard};
use std::time::Duration;
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Why a submission was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The text was empty after trimming.
    EmptyInput,
    /// A reply to an earlier message is still in flight.
    AlreadyComposing,
}

/// Result of [`SessionStore::submit_user_message`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// The user message and the agent reply were both appended.
    Replied {
        reply: Message,
        /// True when the reply raised (and replaced) the crisis alert
        crisis_alert_raised: bool,
    },
}

/// Holds one conversation session.
///
/// `SessionStore` is responsible for:
/// - Appending user messages and agent replies in order
/// - Tracking the composing flag so at most one reply is in flight
/// - Keeping at most one active crisis alert
/// - Recording mood check-ins
/// - Publishing a [`SessionEvent`] for every change
///
/// The state lock is only held for synchronous mutation, never across the
/// await on the reply service. A second submission made while a reply is
/// pending therefore sees `composing == true` and is ignored.
pub struct SessionStore {
    state: RwLock<SessionState>,
    events: broadcast::Sender<SessionEvent>,
    reply_service: Arc<dyn ReplyService>,
    /// Upper bound on the reply wait; `None` waits indefinitely
    reply_timeout: Option<Duration>,
}

impl SessionStore {
    /// Creates an empty store backed by `reply_service`.
    pub fn new(reply_service: Arc<dyn ReplyService>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(SessionState::new()),
            events,
            reply_service,
            reply_timeout: None,
        }
    }

    /// Bounds how long a submission waits for its reply. A timeout is handled
    /// exactly like a reply failure.
    pub fn with_reply_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.reply_timeout = timeout;
        self
    }

    /// Subscribes to state changes made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.read_state().clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.read_state().messages.clone()
    }

    pub fn is_composing(&self) -> bool {
        self.read_state().composing
    }

    pub fn crisis_alert(&self) -> Option<CrisisAlert> {
        self.read_state().crisis_alert.clone()
    }

    pub fn moods(&self) -> Vec<MoodEntry> {
        self.read_state().moods.clone()
    }

    /// Submits user text and waits for the agent reply.
    ///
    /// Empty input, or input arriving while a reply is already pending, is
    /// ignored without error. Otherwise the trimmed text is appended as a
    /// user message, the composing flag is raised and the reply service is
    /// called once. The composing flag is lowered again whatever happens to
    /// the reply, including cancellation of this future.
    ///
    /// # Errors
    ///
    /// Returns the reply service error (or a timeout). In that case no agent
    /// message is appended and the alert is left as it was.
    pub async fn submit_user_message(&self, text: &str) -> Result<SubmitOutcome> {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("[SessionStore] Ignoring empty submission");
            return Ok(SubmitOutcome::Ignored(IgnoreReason::EmptyInput));
        }

        let _composing = {
            let mut state = self.write_state();
            if state.composing {
                tracing::debug!("[SessionStore] Ignoring submission while a reply is pending");
                return Ok(SubmitOutcome::Ignored(IgnoreReason::AlreadyComposing));
            }
            self.dispatch(&mut state, SessionAction::AddMessage(Message::user(text)));
            self.dispatch(&mut state, SessionAction::SetComposing(true));
            ComposingGuard { store: self }
        };

        tracing::info!(chars = text.len(), "[SessionStore] User message submitted");

        let outcome = self.request_reply(text).await.inspect_err(|e| {
            tracing::warn!(error = %e, "[SessionStore] Reply failed, nothing appended");
        })?;

        let mut state = self.write_state();
        let reply = outcome.message.clone();
        self.dispatch(&mut state, SessionAction::AddMessage(outcome.message));

        let crisis_alert_raised = match outcome.crisis_alert {
            Some(alert) => {
                tracing::warn!(
                    alert_id = %alert.id,
                    severity = %alert.level,
                    "[SessionStore] Crisis alert raised"
                );
                self.dispatch(&mut state, SessionAction::SetCrisisAlert(Some(alert)));
                true
            }
            None => false,
        };

        Ok(SubmitOutcome::Replied {
            reply,
            crisis_alert_raised,
        })
    }

    /// Clears the active crisis alert, if any.
    pub fn dismiss_crisis_alert(&self) {
        let mut state = self.write_state();
        if self.dispatch(&mut state, SessionAction::SetCrisisAlert(None)) {
            tracing::info!("[SessionStore] Crisis alert dismissed");
        }
    }

    /// Records a mood check-in.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `score` is outside 1..=5.
    pub fn record_mood(&self, score: u8, notes: Option<String>) -> Result<MoodEntry> {
        let entry = MoodEntry::new(MoodScore::new(score)?, notes);
        let mut state = self.write_state();
        self.dispatch(&mut state, SessionAction::AddMoodEntry(entry.clone()));
        tracing::info!(score, "[SessionStore] Mood recorded");
        Ok(entry)
    }

    async fn request_reply(&self, text: &str) -> Result<ReplyOutcome> {
        match self.reply_timeout {
            Some(limit) => tokio::time::timeout(limit, self.reply_service.send_message(text))
                .await
                .map_err(|_| BloomError::timeout("agent reply", limit.as_secs()))?,
            None => self.reply_service.send_message(text).await,
        }
    }

    /// Applies `action` and publishes the resulting event. Returns whether the
    /// state changed.
    fn dispatch(&self, state: &mut SessionState, action: SessionAction) -> bool {
        match state.apply(action) {
            Some(event) => {
                // No subscribers is fine.
                let _ = self.events.send(event);
                true
            }
            None => false,
        }
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Lowers the composing flag when dropped.
struct ComposingGuard<'a> {
    store: &'a SessionStore,
}

impl Drop for ComposingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.store.write_state();
        self.store.dispatch(&mut state, SessionAction::SetComposing(false));
    }
}
