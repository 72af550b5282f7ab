//! Weight log repository.
//!
//! Read-only: weight entries are logged by a separate ingestion path and only
//! consumed here.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vitala_core::{UserId, WeightEntryId};

use super::RepositoryError;
use crate::models::WeightEntry;

/// Internal row type for weight entry queries.
#[derive(Debug, sqlx::FromRow)]
struct WeightEntryRow {
    id: i32,
    weight_kg: f64,
    date: DateTime<Utc>,
    notes: Option<String>,
}

impl From<WeightEntryRow> for WeightEntry {
    fn from(row: WeightEntryRow) -> Self {
        Self {
            id: WeightEntryId::new(row.id),
            weight_kg: row.weight_kg,
            date: row.date,
            notes: row.notes,
        }
    }
}

/// Repository for weight log database operations.
pub struct WeightRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WeightRepository<'a> {
    /// Create a new weight repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the most recent weight entries for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent_for_user(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<WeightEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, WeightEntryRow>(
            "SELECT id, weight_kg, date, notes
             FROM weight_entries
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
