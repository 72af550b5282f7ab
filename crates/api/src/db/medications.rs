//! Medication repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vitala_core::{MedicationId, MedicationStatus, UserId};

use super::RepositoryError;
use crate::models::Medication;

/// Internal row type for medication queries.
#[derive(Debug, sqlx::FromRow)]
struct MedicationRow {
    id: i32,
    name: String,
    dosage: String,
    frequency: String,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    status: String,
    notes: Option<String>,
}

impl TryFrom<MedicationRow> for Medication {
    type Error = RepositoryError;

    fn try_from(row: MedicationRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<MedicationStatus>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        Ok(Self {
            id: MedicationId::new(row.id),
            name: row.name,
            dosage: row.dosage,
            frequency: row.frequency,
            start_date: row.start_date,
            end_date: row.end_date,
            status,
            notes: row.notes,
        })
    }
}

/// Repository for medication database operations.
pub struct MedicationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MedicationRepository<'a> {
    /// Create a new medication repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get all active medication courses for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn active_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Medication>, RepositoryError> {
        let rows = sqlx::query_as::<_, MedicationRow>(
            "SELECT id, name, dosage, frequency, start_date, end_date,
                    status, notes
             FROM medications
             WHERE user_id = $1 AND status = 'active'
             ORDER BY start_date DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
