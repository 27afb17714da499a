//! Identity and authentication service traits.

use super::model::{AuthSession, LoginCredentials, User};
use crate::error::Result;

/// Synchronous read of the previously stored identity.
///
/// The session store never depends on this; presentation layers use it to
/// greet the user.
pub trait IdentityProvider: Send + Sync {
    /// Returns the stored user, or `None` when nobody is signed in or the
    /// stored data cannot be read.
    fn current_user(&self) -> Option<User>;

    /// Returns true if a user is stored.
    fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }
}

/// Mock sign-in flows backed by local storage.
#[async_trait::async_trait]
pub trait AuthService: IdentityProvider {
    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing fields or a short password.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession>;

    /// Signs in through the (simulated) Google OAuth flow.
    async fn login_with_google(&self) -> Result<AuthSession>;

    /// Forgets the stored identity.
    fn logout(&self) -> Result<()>;

    /// Returns the stored token, if any.
    fn token(&self) -> Option<String>;
}
