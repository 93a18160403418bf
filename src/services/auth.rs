//! Authentication service.
//!
//! Signup, login, and session checks over the credential store, password
//! hasher, and token issuer. Login failures deliberately share a single error
//! shape so callers cannot tell an unknown username from a wrong password.

use crate::auth::{hash_password, verify_password, TokenIssuer};
use crate::error::{Error, Result};
use crate::storage::{Storage, UserRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserView {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

/// A user together with a freshly issued token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub user: UserView,
    pub token: String,
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    storage: Storage,
    tokens: TokenIssuer,
    min_password_len: usize,
}

impl AuthService {
    pub fn new(storage: Storage, tokens: TokenIssuer, min_password_len: usize) -> Self {
        Self {
            storage,
            tokens,
            min_password_len,
        }
    }

    /// Register a new user and log them in immediately.
    ///
    /// The username pre-check gives the friendly error in the common case;
    /// the UNIQUE constraint on the insert is the authoritative guard against
    /// concurrent duplicate signups.
    pub async fn signup(&self, username: &str, password: &str) -> Result<AuthenticatedUser> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::Validation("Username is required".to_string()));
        }
        if password.len() < self.min_password_len {
            return Err(Error::Validation(format!(
                "Password must be at least {} characters",
                self.min_password_len
            )));
        }

        if self.storage.find_user_by_username(username).await?.is_some() {
            return Err(Error::Conflict("User already exists".to_string()));
        }

        let user = UserRecord {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        };

        self.storage.insert_user(&user).await?;

        info!(user_id = %user.id, username = %user.username, "User created");

        let token = self.tokens.issue(&user.id)?;

        Ok(AuthenticatedUser {
            user: user.into(),
            token,
        })
    }

    /// Authenticate with username and password, returning a fresh token.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthenticatedUser> {
        debug!(username = %username, "Authenticating user");

        let unauthorized = || Error::Unauthorized("Invalid username or password".to_string());

        let user = self
            .storage
            .find_user_by_username(username)
            .await?
            .ok_or_else(unauthorized)?;

        if !verify_password(password, &user.password_hash)? {
            warn!(username = %username, "Failed authentication attempt");
            return Err(unauthorized());
        }

        let token = self.tokens.issue(&user.id)?;

        info!(user_id = %user.id, "User authenticated");

        Ok(AuthenticatedUser {
            user: user.into(),
            token,
        })
    }

    /// Resolve a token to its user. Fails with `Unauthorized` when the token
    /// is invalid or expired, or when the user no longer exists.
    pub async fn check_session(&self, token: &str) -> Result<UserView> {
        let user_id = self.tokens.verify(token)?;
        self.user_by_id(&user_id).await
    }

    /// Load the public view of a user already authenticated upstream.
    pub async fn user_by_id(&self, user_id: &str) -> Result<UserView> {
        self.storage
            .find_user_by_id(user_id)
            .await?
            .map(UserView::from)
            .ok_or_else(|| Error::Unauthorized("Not authorized".to_string()))
    }

    /// Delete a user; owned tasks cascade away with them.
    pub async fn delete_user(&self, user_id: &str) -> Result<()> {
        if !self.storage.delete_user(user_id).await? {
            return Err(Error::NotFound("User not found".to_string()));
        }
        info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> AuthService {
        let storage = Storage::in_memory().await.unwrap();
        AuthService::new(storage, TokenIssuer::new("test-secret", 60), 3)
    }

    #[tokio::test]
    async fn test_signup_hashes_password_and_logs_in() {
        let svc = service().await;
        let authed = svc.signup("alice", "pw1").await.unwrap();

        assert_eq!(authed.user.username, "alice");
        assert!(!authed.token.is_empty());

        // Stored hash must not be the plaintext.
        let stored = svc
            .storage
            .find_user_by_username("alice")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.password_hash, "pw1");
        assert!(verify_password("pw1", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_signup_is_conflict_regardless_of_password() {
        let svc = service().await;
        svc.signup("alice", "pw1").await.unwrap();

        let err = svc.signup("alice", "different").await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let svc = service().await;
        let err = svc.signup("alice", "").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_login_token_resolves_to_same_user() {
        let svc = service().await;
        let created = svc.signup("alice", "pw1").await.unwrap();

        let authed = svc.login("alice", "pw1").await.unwrap();
        let session = svc.check_session(&authed.token).await.unwrap();
        assert_eq!(session.id, created.user.id);
    }

    #[tokio::test]
    async fn test_login_failures_share_one_error_shape() {
        let svc = service().await;
        svc.signup("alice", "pw1").await.unwrap();

        let wrong_password = svc.login("alice", "nope").await.unwrap_err();
        let unknown_user = svc.login("mallory", "pw1").await.unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(matches!(wrong_password, Error::Unauthorized(_)));
        assert!(matches!(unknown_user, Error::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_check_session_rejects_garbage_and_deleted_users() {
        let svc = service().await;
        let authed = svc.signup("alice", "pw1").await.unwrap();

        assert!(svc.check_session("not-a-token").await.is_err());

        svc.delete_user(&authed.user.id).await.unwrap();
        let err = svc.check_session(&authed.token).await.unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)), "got {err:?}");
    }
}
