//! Reply-generation collaborator contract.

use super::crisis::CrisisAlert;
use super::message::Message;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What the reply service hands back for one user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyOutcome {
    /// The agent's reply, appended to the log as-is
    pub message: Message,
    /// Present when the user text was classified as crisis-indicating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crisis_alert: Option<CrisisAlert>,
}

/// Produces agent replies for user messages.
///
/// The session store calls `send_message` exactly once per accepted
/// submission and never retries a failure.
#[async_trait]
pub trait ReplyService: Send + Sync {
    /// Generates a reply to `text`.
    ///
    /// # Returns
    ///
    /// - `Ok(ReplyOutcome)`: the reply and an optional crisis alert
    /// - `Err(_)`: the collaborator failed; nothing is appended
    async fn send_message(&self, text: &str) -> Result<ReplyOutcome>;
}
