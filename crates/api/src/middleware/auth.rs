//! Authentication middleware and extractors.
//!
//! Provides an extractor that gates protected routes on a valid bearer
//! token: the token is extracted from the `Authorization` header, verified,
//! and the referenced user is loaded and attached to the request.

use axum::{extract::FromRequestParts, http::header, http::request::Parts};

use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

/// Extractor that requires bearer-token authentication.
///
/// The password hash never rides along; the repository's user queries don't
/// select it.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub User);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = bearer_token(header).ok_or_else(|| {
            AppError::Unauthorized("You are not logged in. Please log in to get access.".to_string())
        })?;

        // Signature/expiry failures map to 401, a structurally invalid
        // subject in an otherwise valid token maps to 400
        let user_id = state.tokens().verify(token)?;

        let user = UserRepository::new(state.pool())
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized(
                    "The user belonging to this token no longer exists.".to_string(),
                )
            })?;

        Ok(Self(user))
    }
}

/// Extract the token from an `Authorization` header value.
///
/// The header must use the `Bearer` scheme; anything else is treated as
/// absent.
fn bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_present() {
        assert_eq!(
            bearer_token(Some("Bearer abc.def.ghi")),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn test_bearer_token_missing_header() {
        assert_eq!(bearer_token(None), None);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        assert_eq!(bearer_token(Some("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(Some("bearer abc")), None);
    }

    #[test]
    fn test_bearer_token_empty_token() {
        assert_eq!(bearer_token(Some("Bearer ")), None);
        assert_eq!(bearer_token(Some("Bearer")), None);
    }
}
