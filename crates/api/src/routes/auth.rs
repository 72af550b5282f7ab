//! Authentication route handlers.
//!
//! Handles registration, login, and the token-authenticated profile update.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use vitala_core::{Email, UserId};

use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::User;
use crate::services::{AuthService, NameRule, ProfileUpdate};
use crate::state::AppState;

// =============================================================================
// Request Types
// =============================================================================

/// Registration and login request body.
///
/// Fields are optional so presence is checked by the validation path (with
/// its own message) instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Profile update request body, shared by both update routes.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub biological_sex: Option<String>,
    pub current_weight_kg: Option<f64>,
    pub goal_weight_kg: Option<f64>,
}

impl From<ProfileUpdateRequest> for ProfileUpdate {
    fn from(body: ProfileUpdateRequest) -> Self {
        Self {
            name: body.name,
            age: body.age,
            height_cm: body.height_cm,
            biological_sex: body.biological_sex,
            current_weight_kg: body.current_weight_kg,
            goal_weight_kg: body.goal_weight_kg,
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Generic `data` wrapper holding a single user payload.
#[derive(Debug, Serialize)]
pub struct UserEnvelope<T> {
    pub user: T,
}

/// Abbreviated user returned from registration and login.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub email: Email,
    pub is_profile_completed: bool,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            is_profile_completed: user.is_profile_completed,
        }
    }
}

/// Response for registration and login: a token plus a user summary.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub status: &'static str,
    pub token: String,
    pub data: UserEnvelope<UserSummary>,
}

/// Response carrying a full user record.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub status: &'static str,
    pub data: UserEnvelope<User>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Register a new account.
///
/// `POST /api/auth/register`
///
/// # Errors
///
/// Returns 400 for validation failures or an already-registered email,
/// 500 for store errors.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let user = AuthService::new(state.pool())
        .register(
            body.email.as_deref().unwrap_or(""),
            body.password.as_deref().unwrap_or(""),
        )
        .await?;

    let token = issue_token(&state, user.id)?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            status: "success",
            token,
            data: UserEnvelope {
                user: UserSummary::from(&user),
            },
        }),
    ))
}

/// Login with email and password.
///
/// `POST /api/auth/login`
///
/// # Errors
///
/// Returns 400 for validation failures, 401 for a missing user or wrong
/// password (one indistinguishable message for both), 500 for store errors.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>> {
    let user = AuthService::new(state.pool())
        .login(
            body.email.as_deref().unwrap_or(""),
            body.password.as_deref().unwrap_or(""),
        )
        .await?;

    let token = issue_token(&state, user.id)?;

    Ok(Json(AuthResponse {
        status: "success",
        token,
        data: UserEnvelope {
            user: UserSummary::from(&user),
        },
    }))
}

/// Update the authenticated user's biometric profile. Display name is
/// optional on this route.
///
/// `PATCH /api/auth/update-profile`
///
/// # Errors
///
/// Returns 400 for validation failures, 404 if the user record has gone
/// missing, 500 for store errors.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<ProfileUpdateRequest>,
) -> Result<Json<UserResponse>> {
    apply_profile_update(&state, &user, body, NameRule::Optional).await
}

/// Shared implementation for both profile-update route variants.
///
/// The target user always comes from the auth gate, never from the body.
pub(super) async fn apply_profile_update(
    state: &AppState,
    user: &User,
    body: ProfileUpdateRequest,
    name_rule: NameRule,
) -> Result<Json<UserResponse>> {
    let profile = ProfileUpdate::from(body).validate(name_rule)?;

    let updated = UserRepository::new(state.pool())
        .update_profile(user.id, &profile)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse {
        status: "success",
        data: UserEnvelope { user: updated },
    }))
}

/// Issue a bearer token, mapping signing failures to 500.
fn issue_token(state: &AppState, user_id: UserId) -> Result<String> {
    state
        .tokens()
        .issue(user_id)
        .map_err(|e| AppError::Internal(format!("failed to sign token: {e}")))
}
