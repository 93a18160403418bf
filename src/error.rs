//! Error types for the taskdeck service.

use crate::auth::token::TokenError;

/// Result type alias for taskdeck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the taskdeck service.
///
/// Variants map one-to-one onto the domain error taxonomy: `Conflict` for
/// duplicate usernames, `Unauthorized` for failed credential or token checks,
/// `NotFound` for owner-scoped lookups that miss (whether the record is
/// absent or belongs to someone else), and `Validation` for rejected input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Duplicate resource, e.g. a username that is already taken
    #[error("{0}")]
    Conflict(String),

    /// Bad credentials or an invalid session
    #[error("{0}")]
    Unauthorized(String),

    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Owner-scoped lookup miss; carries the client-facing message
    #[error("{0}")]
    NotFound(String),

    /// Token issue/verify failures
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Password hashing errors
    #[error("password hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// Storage layer errors
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True when the underlying database error is a unique-constraint
    /// violation. The UNIQUE index on `users.username` is the authoritative
    /// guard against concurrent duplicate signups; the loser of that race
    /// lands here.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Error::Database(sqlx::Error::Database(db)) => {
                matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
            }
            _ => false,
        }
    }
}
