//! File-backed identity and mock sign-in flows.

use crate::mock_api::MockDelays;
use crate::paths::BloomPaths;
use crate::storage::{AtomicFile, FileFormat};
use async_trait::async_trait;
use brainbloom_core::Result;
use brainbloom_core::user::{AuthService, AuthSession, IdentityProvider, LoginCredentials, User};
use chrono::Utc;
use std::time::Duration;

/// Stores the signed-in user in `identity.json` under the BrainBloom home.
///
/// Nothing is verified against a server: any well-formed credentials sign in.
pub struct FileIdentityStore {
    file: AtomicFile<AuthSession>,
    login_delay: Duration,
    google_login_delay: Duration,
}

impl FileIdentityStore {
    pub fn new(paths: &BloomPaths, delays: &MockDelays) -> Self {
        Self {
            file: AtomicFile::new(paths.identity_file(), FileFormat::Json).private(),
            login_delay: delays.login,
            google_login_delay: delays.google_login,
        }
    }

    fn stored_session(&self) -> Option<AuthSession> {
        match self.file.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(
                    path = %self.file.path().display(),
                    error = %e,
                    "[IdentityStore] Ignoring unreadable identity file"
                );
                None
            }
        }
    }

    fn persist(&self, session: AuthSession) -> Result<AuthSession> {
        self.file.save(&session)?;
        tracing::info!(user_id = %session.user.id, "[IdentityStore] Signed in");
        Ok(session)
    }
}

impl IdentityProvider for FileIdentityStore {
    fn current_user(&self) -> Option<User> {
        self.stored_session().map(|session| session.user)
    }
}

#[async_trait]
impl AuthService for FileIdentityStore {
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession> {
        credentials.validate()?;
        tokio::time::sleep(self.login_delay).await;

        let session = AuthSession {
            user: User {
                id: "1".to_string(),
                name: credentials.display_name(),
                email: credentials.email.trim().to_string(),
                avatar: None,
            },
            token: Some(format!("mock_token_{}", Utc::now().timestamp_millis())),
        };
        self.persist(session)
    }

    async fn login_with_google(&self) -> Result<AuthSession> {
        tokio::time::sleep(self.google_login_delay).await;

        let session = AuthSession {
            user: User {
                id: "google-1".to_string(),
                name: "Alex Johnson".to_string(),
                email: "alex.johnson@gmail.com".to_string(),
                avatar: None,
            },
            token: Some(format!("google_token_{}", Utc::now().timestamp_millis())),
        };
        self.persist(session)
    }

    fn logout(&self) -> Result<()> {
        self.file.remove()?;
        tracing::info!("[IdentityStore] Signed out");
        Ok(())
    }

    fn token(&self) -> Option<String> {
        self.stored_session().and_then(|session| session.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> FileIdentityStore {
        let paths = BloomPaths::new(Some(dir.path())).unwrap();
        FileIdentityStore::new(&paths, &MockDelays::none())
    }

    #[tokio::test]
    async fn test_login_persists_user() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert!(!store.is_authenticated());

        let session = store
            .login(LoginCredentials::new("sam@example.com", "secret1"))
            .await
            .unwrap();

        assert_eq!(session.user.id, "1");
        assert_eq!(session.user.name, "sam");
        assert!(session.token.as_deref().unwrap().starts_with("mock_token_"));

        // A fresh handle reads the same file.
        let reopened = open_store(&dir);
        assert_eq!(reopened.current_user(), Some(session.user));
        assert_eq!(reopened.token(), session.token);
    }

    #[tokio::test]
    async fn test_invalid_credentials_store_nothing() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let err = store
            .login(LoginCredentials::new("sam@example.com", "123"))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert!(store.current_user().is_none());
    }

    #[tokio::test]
    async fn test_google_login_and_logout() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let session = store.login_with_google().await.unwrap();
        assert_eq!(session.user.name, "Alex Johnson");
        assert!(store.token().unwrap().starts_with("google_token_"));

        store.logout().unwrap();
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
        store.logout().unwrap();
    }

    #[test]
    fn test_corrupt_identity_reads_as_signed_out() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("identity.json"), "not json").unwrap();
        assert!(open_store(&dir).current_user().is_none());
    }
}
