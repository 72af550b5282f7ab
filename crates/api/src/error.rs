//! Unified error handling.
//!
//! Provides a unified [`AppError`] type covering the whole response taxonomy:
//! validation failures (400), auth failures (401), missing resources (404),
//! malformed identifiers (400), and unexpected errors (500). All route
//! handlers return `Result<T, AppError>`.
//!
//! Responses use the service's JSON envelope: client failures are
//! `{"status":"fail","message":...}`, server errors are
//! `{"status":"error","message":"Something went wrong"}`. Internal details
//! are always logged, never sent to clients - except in development mode,
//! where [`expose_error_details`] re-attaches them to 500 responses.

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{AuthError, ProfileError, TokenError};
use crate::state::AppState;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request failed a validation check. First failure wins; violations are
    /// never aggregated.
    #[error("{0}")]
    Validation(String),

    /// Request is not properly authenticated.
    #[error("{0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// An identifier was structurally invalid.
    #[error("Invalid user ID format")]
    MalformedId,

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body for error responses.
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

/// Response extension carrying the suppressed internal detail of a 500.
///
/// [`expose_error_details`] reads this in development mode.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

impl AppError {
    const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedId => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");

            let body = ErrorBody {
                status: "error",
                message: "Something went wrong".to_string(),
            };
            let mut response = (status, Json(body)).into_response();
            response.extensions_mut().insert(ErrorDetail(self.to_string()));
            return response;
        }

        let body = ErrorBody {
            status: "fail",
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => {
                Self::Validation("Please provide email and password".to_string())
            }
            AuthError::InvalidEmail(_) => {
                Self::Validation("Please provide a valid email address".to_string())
            }
            AuthError::WeakPassword { .. } => {
                Self::Validation("Password must be at least 6 characters long".to_string())
            }
            AuthError::UserAlreadyExists => {
                Self::Validation("User with this email already exists".to_string())
            }
            // One message for missing user and wrong password; telling them
            // apart would let callers probe which emails are registered
            AuthError::InvalidCredentials => {
                Self::Unauthorized("Invalid email or password".to_string())
            }
            AuthError::Repository(e) => Self::Database(e),
            AuthError::PasswordHash => Self::Internal("password hashing failed".to_string()),
        }
    }
}

impl From<ProfileError> for AppError {
    fn from(err: ProfileError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid(_) => {
                Self::Unauthorized("Invalid token. Please log in again.".to_string())
            }
            TokenError::MalformedSubject(_) => Self::MalformedId,
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Response-mapping layer that re-attaches internal error details to 500
/// responses in development mode.
///
/// The error type itself stays configuration-free; this layer is the only
/// place that consults the deployment mode.
pub async fn expose_error_details(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if state.config().environment.is_production() {
        return response;
    }

    let Some(ErrorDetail(detail)) = response.extensions().get::<ErrorDetail>().cloned() else {
        return response;
    };

    let status = response.status();
    let body = serde_json::json!({
        "status": "error",
        "message": "Something went wrong",
        "error": detail,
    });
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "User not found");

        let err = AppError::Validation("Age must be between 13 and 120".to_string());
        assert_eq!(err.to_string(), "Age must be between 13 and 120");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::Validation("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(get_status(AppError::MalformedId), StatusCode::BAD_REQUEST);
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_errors_keep_detail_out_of_band() {
        let response = AppError::Internal("connection refused".to_string()).into_response();

        // The suppressed detail rides along as an extension, not in the body
        let detail = response.extensions().get::<ErrorDetail>();
        assert!(detail.is_some_and(|d| d.0.contains("connection refused")));
    }

    #[test]
    fn test_auth_error_mapping() {
        let err: AppError = AuthError::MissingCredentials.into();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "Please provide email and password");

        let err: AppError = AuthError::InvalidCredentials.into();
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert_eq!(err.to_string(), "Invalid email or password");

        let err: AppError = AuthError::UserAlreadyExists.into();
        assert_eq!(err.to_string(), "User with this email already exists");
    }

    #[test]
    fn test_profile_error_mapping() {
        let err: AppError = ProfileError::AgeOutOfRange.into();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "Age must be between 13 and 120");
    }

    #[test]
    fn test_malformed_subject_maps_to_bad_request() {
        let err: AppError = TokenError::MalformedSubject("zzz".to_string()).into();
        assert!(matches!(err, AppError::MalformedId));
        assert_eq!(
            err.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
