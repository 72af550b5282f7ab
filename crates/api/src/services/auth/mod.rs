//! Authentication service.
//!
//! Provides password registration and login on top of the user repository.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use vitala_core::Email;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Authentication service.
///
/// Handles user registration and login.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either input is empty.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = validate_credentials(email, password)?;

        // Hash password off the async runtime (argon2 is CPU-bound)
        let password_hash = hash_password(password.to_owned()).await?;

        let user = self
            .users
            .create(&email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password.
    ///
    /// Inputs go through the same format checks as registration. A missing
    /// user and a wrong password produce the same error so the endpoint
    /// can't be used to enumerate accounts.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = validate_credentials(email, password)?;

        let (user, password_hash) = self
            .users
            .get_credentials(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password.to_owned(), password_hash).await?;

        Ok(user)
    }
}

/// Validate a raw email/password pair.
///
/// Order matters: presence, then email format, then password length. The
/// first failing check wins.
fn validate_credentials(email: &str, password: &str) -> Result<Email, AuthError> {
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    let email = Email::parse(email)?;

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword {
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(email)
}

/// Hash a password using Argon2id on a blocking thread.
async fn hash_password(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHash)
    })
    .await
    .map_err(|_| AuthError::PasswordHash)?
}

/// Verify a password against a hash on a blocking thread.
async fn verify_password(password: String, hash: String) -> Result<(), AuthError> {
    tokio::task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&hash).map_err(|_| AuthError::InvalidCredentials)?;
        let argon2 = Argon2::default();

        argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)
    })
    .await
    .map_err(|_| AuthError::PasswordHash)?
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_credentials_presence_first() {
        // Presence is checked before format, so an empty email with a bad
        // password still reports missing credentials
        assert!(matches!(
            validate_credentials("", ""),
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            validate_credentials("user@example.com", ""),
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            validate_credentials("", "password123"),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_validate_credentials_email_format_before_password() {
        // Both email and password are invalid; email format wins
        assert!(matches!(
            validate_credentials("not-an-email", "abc"),
            Err(AuthError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_validate_credentials_short_password() {
        assert!(matches!(
            validate_credentials("user@example.com", "12345"),
            Err(AuthError::WeakPassword { min: 6 })
        ));
    }

    #[test]
    fn test_validate_credentials_accepts_six_chars() {
        assert!(validate_credentials("user@example.com", "123456").is_ok());
    }

    #[tokio::test]
    async fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("hunter2secret".to_owned()).await.unwrap();

        // PHC string format with embedded salt
        assert!(hash.starts_with("$argon2"));

        verify_password("hunter2secret".to_owned(), hash.clone())
            .await
            .unwrap();

        assert!(matches!(
            verify_password("wrong-password".to_owned(), hash).await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let first = hash_password("same-password".to_owned()).await.unwrap();
        let second = hash_password("same-password".to_owned()).await.unwrap();
        assert_ne!(first, second);
    }
}
