//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: User identity and credential types
//! - `service`: Identity provider and mock authentication traits
//!
//! # Usage
//!
//! ```ignore
//! use brainbloom_core::user::{User, IdentityProvider, AuthService};
//! ```

mod model;
mod service;

// Re-export public API
pub use model::{AuthSession, LoginCredentials, MIN_PASSWORD_LEN, User};
pub use service::{AuthService, IdentityProvider};
