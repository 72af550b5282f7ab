//! User repository for database operations.
//!
//! Queries are runtime-checked (`sqlx::query_as` with bound parameters);
//! row structs convert into domain types via `TryFrom` so invalid stored
//! values surface as [`RepositoryError::DataCorruption`].

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vitala_core::{BiologicalSex, BmiCategory, Email, UserId};

use super::RepositoryError;
use crate::models::User;
use crate::services::profile::ValidatedProfile;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` user queries.
///
/// Deliberately excludes `password_hash`; only [`UserRepository::get_credentials`]
/// reads that column.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    email: String,
    name: Option<String>,
    age: Option<i32>,
    height_cm: Option<f64>,
    biological_sex: Option<String>,
    start_weight_kg: Option<f64>,
    current_weight_kg: Option<f64>,
    goal_weight_kg: Option<f64>,
    bmi: Option<f64>,
    bmi_category: Option<String>,
    is_profile_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        let biological_sex = row
            .biological_sex
            .as_deref()
            .map(str::parse::<BiologicalSex>)
            .transpose()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        let bmi_category = row
            .bmi_category
            .as_deref()
            .map(str::parse::<BmiCategory>)
            .transpose()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        Ok(Self {
            id: UserId::new(row.id),
            email,
            name: row.name,
            age: row.age,
            height_cm: row.height_cm,
            biological_sex,
            start_weight_kg: row.start_weight_kg,
            current_weight_kg: row.current_weight_kg,
            goal_weight_kg: row.goal_weight_kg,
            bmi: row.bmi,
            bmi_category,
            is_profile_completed: row.is_profile_completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Columns shared by every user-returning query.
const USER_COLUMNS: &str = "id, email, name, age, height_cm, biological_sex, \
     start_weight_kg, current_weight_kg, goal_weight_kg, bmi, bmi_category, \
     is_profile_completed, created_at, updated_at";

// =============================================================================
// Filters
// =============================================================================

/// Optional filters for the user listing.
///
/// Equality filters on BMI category and biological sex, and an inclusive age
/// range with either bound optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserFilter {
    pub bmi_category: Option<BmiCategory>,
    pub biological_sex: Option<BiologicalSex>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a new user with email and password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (email, password_hash)
             VALUES ($1, $2)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Get a user together with their password hash by email.
    ///
    /// Returns `None` if the user doesn't exist. This is the only query that
    /// reads the `password_hash` column.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        let Some(CredentialRow {
            user,
            password_hash,
        }) = row
        else {
            return Ok(None);
        };

        Ok(Some((user.try_into()?, password_hash)))
    }

    /// Apply a validated profile update to a user.
    ///
    /// Persists the biometric fields plus the jointly derived BMI and
    /// category, and marks the profile completed. Optional fields that were
    /// not supplied keep their stored values. Returns `None` if the user no
    /// longer exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn update_profile(
        &self,
        id: UserId,
        profile: &ValidatedProfile,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users
             SET name = COALESCE($2, name),
                 age = $3,
                 height_cm = $4,
                 biological_sex = $5,
                 current_weight_kg = $6,
                 goal_weight_kg = COALESCE($7, goal_weight_kg),
                 bmi = $8,
                 bmi_category = $9,
                 is_profile_completed = TRUE,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(profile.name.as_deref())
        .bind(profile.age)
        .bind(profile.height_cm)
        .bind(profile.biological_sex.as_str())
        .bind(profile.current_weight_kg)
        .bind(profile.goal_weight_kg)
        .bind(profile.bmi.value)
        .bind(profile.bmi.category.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List users matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list(
        &self,
        filter: UserFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE ($1::text IS NULL OR bmi_category = $1)
               AND ($2::text IS NULL OR biological_sex = $2)
               AND ($3::int IS NULL OR age >= $3)
               AND ($4::int IS NULL OR age <= $4)
             ORDER BY created_at DESC
             LIMIT $5 OFFSET $6"
        ))
        .bind(filter.bmi_category.map(|c| c.as_str()))
        .bind(filter.biological_sex.map(|s| s.as_str()))
        .bind(filter.min_age)
        .bind(filter.max_age)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Count users matching a filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self, filter: UserFilter) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users
             WHERE ($1::text IS NULL OR bmi_category = $1)
               AND ($2::text IS NULL OR biological_sex = $2)
               AND ($3::int IS NULL OR age >= $3)
               AND ($4::int IS NULL OR age <= $4)",
        )
        .bind(filter.bmi_category.map(|c| c.as_str()))
        .bind(filter.biological_sex.map(|s| s.as_str()))
        .bind(filter.min_age)
        .bind(filter.max_age)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}

/// Row type for the credentials query: the full user row plus the hash.
#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}
