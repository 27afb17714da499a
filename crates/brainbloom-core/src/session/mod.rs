//! Conversation session domain module.
//!
//! # Module Structure
//!
//! - `message`: Conversation message types (`Message`, `Sender`, `MessageKind`)
//! - `crisis`: Crisis classification (`classify`) and `CrisisAlert`
//! - `state`: Session state and the `SessionAction` reducer
//! - `event`: Change notifications published by the store
//! - `reply`: Reply-generation collaborator trait
//! - `store`: The session store (`SessionStore`)
//!
//! # Usage
//!
//! ```ignore
//! use brainbloom_core::session::{SessionStore, ReplyService, SubmitOutcome};
//! use brainbloom_core::session::{classify, CrisisAlert, Message};
//! ```

mod crisis;
mod event;
mod message;
mod reply;
mod state;
mod store;


// Re-export public API
pub use crisis::{
    CRISIS_ALERT_ACTIONS, CRISIS_ALERT_MESSAGE, CRISIS_PHRASES, Classification, CrisisAlert,
    CrisisLevel, classify, matched_phrases,
};
pub use event::SessionEvent;
pub use message::{Message, MessageKind, Sender};
pub use reply::{ReplyOutcome, ReplyService};
pub use state::{SessionAction, SessionState};
pub use store::{IgnoreReason, SessionStore, SubmitOutcome};
