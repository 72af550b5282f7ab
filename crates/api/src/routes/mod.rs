//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET   /health                       - Liveness check
//! GET   /health/ready                 - Readiness check (pings the database)
//!
//! # Auth
//! POST  /api/auth/register            - Create an account, returns a token
//! POST  /api/auth/login               - Login, returns a token
//! PATCH /api/auth/update-profile      - Update profile (auth; name optional)
//!
//! # Users (all require auth)
//! GET   /api/users                    - Paginated, filterable user listing
//! GET   /api/users/get-user-data      - User + weights + shipment + medications
//! POST  /api/users/update-profile     - Update profile (name required)
//! ```

pub mod auth;
pub mod users;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/update-profile", patch(auth::update_profile))
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/get-user-data", get(users::get_user_data))
        .route("/update-profile", post(users::update_profile))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/users", user_routes())
}
