//! Bearer token signing and verification.
//!
//! Tokens are HS256 JWTs carrying the user ID as the subject. Keys are
//! derived once from the configured secret and reused for the process
//! lifetime.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use signcraft_core::UserId;

use super::error::AuthError;

/// How long an issued token stays valid.
const TOKEN_VALIDITY_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User ID the token was issued for.
    sub: i64,
    /// Issued-at, seconds since the epoch.
    iat: i64,
    /// Expiry, seconds since the epoch.
    exp: i64,
}

/// Paired signing and verification keys for bearer tokens.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    /// Derive both keys from the shared secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    /// Issue a signed token for a user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenIssue` if signing fails.
    pub fn issue(&self, user_id: UserId) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.as_i64(),
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_VALIDITY_DAYS)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|_| AuthError::TokenIssue)
    }

    /// Verify a token and extract the user ID it was issued for.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredential` for any malformed, expired,
    /// or wrongly signed token.
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| AuthError::InvalidCredential)?;

        Ok(UserId::new(data.claims.sub))
    }
}
