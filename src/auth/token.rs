//! JWT issuance and verification.
//!
//! Tokens are opaque to clients: an HS256 JWT binding only the user id, with
//! an expiry. Verification is stateless; nothing about a token is persisted.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token verification failures.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    /// Token was well-formed and signed by us, but past its expiry
    #[error("Token expired")]
    Expired,
    /// Malformed, forged, or otherwise undecodable token
    #[error("Invalid token")]
    Invalid,
}

/// JWT claims. Only the user id is carried; no roles, no other metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub iat: i64,    // Issued at
    pub exp: i64,    // Expiration time
}

/// Issues and verifies identity tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    expiry_minutes: i64,
}

impl TokenIssuer {
    pub fn new(secret: impl Into<String>, expiry_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            expiry_minutes,
        }
    }

    /// Issue a token bound to `user_id`.
    pub fn issue(&self, user_id: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.expiry_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|_| TokenError::Invalid)
    }

    /// Verify a token and return the user id it is bound to.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })?;

        Ok(token_data.claims.sub)
    }
}
