//! User route handlers.
//!
//! Listing with pagination and filters, the aggregated user-data read, and
//! the profile-update variant that requires a display name.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use vitala_core::{BiologicalSex, BmiCategory};

use crate::db::users::{UserFilter, UserRepository};
use crate::db::{MedicationRepository, ShipmentRepository, WeightRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Medication, Shipment, User, WeightEntry};
use crate::routes::auth::{ProfileUpdateRequest, UserEnvelope, UserResponse, apply_profile_update};
use crate::services::NameRule;
use crate::state::AppState;

/// Aggregation cap: how many recent weight entries ride along.
const WEIGHT_HISTORY_LIMIT: i64 = 8;

/// Default page size for the user listing.
const DEFAULT_PAGE_SIZE: i64 = 10;

// =============================================================================
// Listing
// =============================================================================

/// Query parameters for the user listing.
#[derive(Debug, Deserialize, Default)]
pub struct ListUsersQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub bmi_category: Option<String>,
    pub biological_sex: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

/// Response for the user listing.
#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub status: &'static str,
    pub results: usize,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
    #[serde(rename = "currentPage")]
    pub current_page: i64,
    pub data: UsersEnvelope,
}

/// `data` wrapper for the listing.
#[derive(Debug, Serialize)]
pub struct UsersEnvelope {
    pub users: Vec<User>,
}

/// List users with pagination and optional filters, newest first.
///
/// `GET /api/users`
///
/// # Errors
///
/// Returns 500 for store errors.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ListUsersResponse>> {
    let (page, limit) = page_and_limit(query.page, query.limit);

    // An unrecognized filter value can't match any stored row, so skip the
    // round-trip and answer with an empty page
    let Some(filter) = parse_filter(&query) else {
        return Ok(Json(ListUsersResponse {
            status: "success",
            results: 0,
            total: 0,
            total_pages: 0,
            current_page: page,
            data: UsersEnvelope { users: Vec::new() },
        }));
    };

    let users = UserRepository::new(state.pool());
    let total = users.count(filter).await?;
    let listed = users.list(filter, limit, (page - 1) * limit).await?;

    Ok(Json(ListUsersResponse {
        status: "success",
        results: listed.len(),
        total,
        total_pages: total_pages(total, limit),
        current_page: page,
        data: UsersEnvelope { users: listed },
    }))
}

/// Normalize page/limit inputs: zero, negative, and absent values fall back
/// to the defaults (page 1, limit 10).
fn page_and_limit(page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let page = page.filter(|p| *p > 0).unwrap_or(1);
    let limit = limit.filter(|l| *l > 0).unwrap_or(DEFAULT_PAGE_SIZE);
    (page, limit)
}

/// Number of pages needed for `total` rows at `limit` rows per page.
fn total_pages(total: i64, limit: i64) -> i64 {
    // Equivalent to `total.div_ceil(limit)`; written out because the signed
    // `i64::div_ceil` is unstable on this toolchain (`int_roundings`).
    // `total` is a non-negative row count and `limit` is normalized > 0.
    (total + limit - 1) / limit
}

/// Build the repository filter from query parameters.
///
/// Returns `None` when an equality filter holds a value that no stored row
/// can have.
fn parse_filter(query: &ListUsersQuery) -> Option<UserFilter> {
    let bmi_category = match query.bmi_category.as_deref() {
        Some(raw) => Some(raw.parse::<BmiCategory>().ok()?),
        None => None,
    };
    let biological_sex = match query.biological_sex.as_deref() {
        Some(raw) => Some(raw.parse::<BiologicalSex>().ok()?),
        None => None,
    };

    Some(UserFilter {
        bmi_category,
        biological_sex,
        min_age: query.min_age,
        max_age: query.max_age,
    })
}

// =============================================================================
// Aggregated Read
// =============================================================================

/// Response for the aggregated user-data read.
#[derive(Debug, Serialize)]
pub struct UserDataResponse {
    pub status: &'static str,
    pub data: UserEnvelope<AggregatedUser>,
}

/// The authenticated user's record merged with their health data.
#[derive(Debug, Serialize)]
pub struct AggregatedUser {
    #[serde(flatten)]
    pub user: User,
    pub weight_history: Vec<WeightEntry>,
    pub next_shipment: Option<Shipment>,
    pub medications: Vec<Medication>,
}

/// Aggregated read for the authenticated user: profile fields plus recent
/// weight history, the next pending shipment, and active medications.
///
/// `GET /api/users/get-user-data`
///
/// # Errors
///
/// Returns 404 if the user record has gone missing, 500 for store errors.
pub async fn get_user_data(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<UserDataResponse>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(current.id)
        .await?
        .ok_or_else(|| AppError::NotFound("No user found with that ID".to_string()))?;

    // The three reads are independent; issue them concurrently
    let weight_repo = WeightRepository::new(state.pool());
    let shipment_repo = ShipmentRepository::new(state.pool());
    let medication_repo = MedicationRepository::new(state.pool());
    let (weight_history, next_shipment, medications) = tokio::try_join!(
        weight_repo.recent_for_user(user.id, WEIGHT_HISTORY_LIMIT),
        shipment_repo.next_pending_for_user(user.id),
        medication_repo.active_for_user(user.id),
    )?;

    Ok(Json(UserDataResponse {
        status: "success",
        data: UserEnvelope {
            user: AggregatedUser {
                user,
                weight_history,
                next_shipment,
                medications,
            },
        },
    }))
}

// =============================================================================
// Profile Update (name required)
// =============================================================================

/// Update the authenticated user's biometric profile. Unlike the
/// `/api/auth` variant, this route requires a display name.
///
/// `POST /api/users/update-profile`
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
    apply_profile_update(&state, &user, body, NameRule::Required).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_and_limit_defaults() {
        assert_eq!(page_and_limit(None, None), (1, 10));
    }

    #[test]
    fn test_page_and_limit_zero_falls_back() {
        // Matches the original service, where a zero query value fell
        // through to the default
        assert_eq!(page_and_limit(Some(0), Some(0)), (1, 10));
    }

    #[test]
    fn test_page_and_limit_negative_falls_back() {
        assert_eq!(page_and_limit(Some(-3), Some(-1)), (1, 10));
    }

    #[test]
    fn test_page_and_limit_passthrough() {
        assert_eq!(page_and_limit(Some(3), Some(25)), (3, 25));
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(95, 10), 10);
    }

    #[test]
    fn test_parse_filter_empty_query() {
        let filter = parse_filter(&ListUsersQuery::default()).unwrap();
        assert!(filter.bmi_category.is_none());
        assert!(filter.biological_sex.is_none());
    }

    #[test]
    fn test_parse_filter_valid_values() {
        let query = ListUsersQuery {
            bmi_category: Some("Normal".to_owned()),
            biological_sex: Some("Other".to_owned()),
            min_age: Some(18),
            max_age: Some(65),
            ..Default::default()
        };
        let filter = parse_filter(&query).unwrap();
        assert_eq!(filter.bmi_category, Some(BmiCategory::Normal));
        assert_eq!(filter.biological_sex, Some(BiologicalSex::Other));
        assert_eq!(filter.min_age, Some(18));
        assert_eq!(filter.max_age, Some(65));
    }

    #[test]
    fn test_parse_filter_unknown_value() {
        let query = ListUsersQuery {
            bmi_category: Some("Svelte".to_owned()),
            ..Default::default()
        };
        assert!(parse_filter(&query).is_none());
    }
}
