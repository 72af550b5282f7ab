//! Bearer token issuance and verification.
//!
//! Tokens are HS256-signed JWTs carrying the user id as the subject and a
//! one-day expiry. The signing secret comes from configuration; there is no
//! built-in default.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vitala_core::UserId;

/// Token lifetime: one day.
const TOKEN_TTL_HOURS: i64 = 24;

/// Errors that can occur when issuing or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signature, structure, or expiry check failed.
    #[error("invalid or expired token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    /// The token verified but its subject is not a valid user id.
    #[error("malformed token subject: {0}")]
    MalformedSubject(String),
}

/// JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// Subject: the user id.
    sub: String,
    /// Issued-at, seconds since the epoch.
    iat: i64,
    /// Expiry, seconds since the epoch.
    exp: i64,
}

/// Token issuer/verifier.
///
/// Cheap to construct once at startup and share via application state.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    /// Create a token service from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    /// Issue a signed token for a user, expiring in one day.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` if signing fails.
    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verify a token's signature and expiry and return the embedded user id.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` if the token is unparseable, has a bad
    /// signature, or has expired.
    /// Returns `TokenError::MalformedSubject` if the subject isn't a user id.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;

        data.claims
            .sub
            .parse::<UserId>()
            .map_err(|_| TokenError::MalformedSubject(data.claims.sub))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&SecretString::from("k9#mQ2$vX7!pL4@wN8^rT3&hJ6*bF1%d"))
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let tokens = service();
        let token = tokens.issue(UserId::new(42)).unwrap();

        let user_id = tokens.verify(&token).unwrap();
        assert_eq!(user_id, UserId::new(42));
    }

    #[test]
    fn test_rejects_token_signed_with_other_secret() {
        let token = service().issue(UserId::new(1)).unwrap();

        let other = TokenService::new(&SecretString::from("z5@qW9#eR2$tY6!uI0^oP4&aS8*dF3%g"));
        assert!(matches!(
            other.verify(&token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_expired_token() {
        let tokens = service();

        // Hand-roll claims that expired well past the default leeway
        let now = Utc::now();
        let claims = Claims {
            sub: "7".to_owned(),
            iat: (now - Duration::hours(48)).timestamp(),
            exp: (now - Duration::hours(24)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &tokens.encoding).unwrap();

        assert!(matches!(
            tokens.verify(&token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            service().verify("not.a.token"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_non_numeric_subject() {
        let tokens = service();

        let now = Utc::now();
        let claims = Claims {
            sub: "definitely-not-an-id".to_owned(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &tokens.encoding).unwrap();

        assert!(matches!(
            tokens.verify(&token),
            Err(TokenError::MalformedSubject(_))
        ));
    }
}
