//! Domain layer for BrainBloom.
//!
//! The heart of this crate is [`session::SessionStore`], the conversation
//! state container: it keeps the append-only message log, the composing flag
//! and the single active crisis alert. Everything else here is a plain data
//! model or a collaborator trait implemented by the infrastructure crate.

pub mod config;
pub mod directory;
pub mod error;
pub mod monitor;
pub mod mood;
pub mod provider;
pub mod session;
pub mod user;

// Re-export common error type
pub use error::{BloomError, Result};
