/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for user
 * sessions and password-reset links. Both kinds share the HMAC secret and
 * carry a `purpose` claim; a token only verifies for the purpose it was
 * issued for.
 */

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Lifetime of a login/signup token
pub const SESSION_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Lifetime of a password-reset token
pub const RESET_TTL: Duration = Duration::from_secs(60 * 60);

/// What a token may be used for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Bearer token for the protected routes
    Session,
    /// Token embedded in a password-reset link
    PasswordReset,
}

impl TokenPurpose {
    pub fn ttl(self) -> Duration {
        match self {
            TokenPurpose::Session => SESSION_TTL,
            TokenPurpose::PasswordReset => RESET_TTL,
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    pub purpose: TokenPurpose,
}

impl Claims {
    /// Parse the subject back into a user id
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Signing and verification keys derived from the configured secret
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Create a token for a user
    ///
    /// # Arguments
    /// * `user_id` - User ID (UUID)
    /// * `email` - User email
    /// * `purpose` - What the token may be used for; also fixes its lifetime
    ///
    /// # Returns
    /// JWT token string
    pub fn issue(
        &self,
        user_id: Uuid,
        email: &str,
        purpose: TokenPurpose,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp().max(0) as u64;
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: now + purpose.ttl().as_secs(),
            iat: now,
            purpose,
        };
        self.sign(&claims)
    }

    /// Verify and decode a token issued for `purpose`
    ///
    /// Fails on a bad signature, a malformed token, an expired `exp` or a
    /// token issued for another purpose.
    pub fn verify(&self, token: &str, purpose: TokenPurpose) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::default())?.claims;
        if claims.purpose != purpose {
            return Err(ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::default(), claims, &self.encoding)
    }
}
