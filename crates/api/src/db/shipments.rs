//! Shipment repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vitala_core::{MedicationId, ShipmentId, ShipmentStatus, UserId};

use super::RepositoryError;
use crate::models::{Shipment, ShipmentItem};

/// Internal row type for shipment queries.
#[derive(Debug, sqlx::FromRow)]
struct ShipmentRow {
    id: i32,
    scheduled_date: DateTime<Utc>,
    status: String,
    tracking_number: Option<String>,
}

/// Internal row type for shipment item queries.
#[derive(Debug, sqlx::FromRow)]
struct ShipmentItemRow {
    medication_id: i32,
    quantity: i32,
}

impl ShipmentRow {
    fn into_shipment(self, items: Vec<ShipmentItem>) -> Result<Shipment, RepositoryError> {
        let status = self
            .status
            .parse::<ShipmentStatus>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        Ok(Shipment {
            id: ShipmentId::new(self.id),
            scheduled_date: self.scheduled_date,
            status,
            items,
            tracking_number: self.tracking_number,
        })
    }
}

/// Repository for shipment database operations.
pub struct ShipmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShipmentRepository<'a> {
    /// Create a new shipment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the user's next pending shipment, i.e. the pending shipment with
    /// the earliest scheduled date, including its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn next_pending_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<Shipment>, RepositoryError> {
        let row = sqlx::query_as::<_, ShipmentRow>(
            "SELECT id, scheduled_date, status, tracking_number
             FROM shipments
             WHERE user_id = $1 AND status = 'pending'
             ORDER BY scheduled_date ASC
             LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.items_for_shipment(ShipmentId::new(row.id)).await?;

        Ok(Some(row.into_shipment(items)?))
    }

    /// Get the items belonging to a shipment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn items_for_shipment(
        &self,
        shipment_id: ShipmentId,
    ) -> Result<Vec<ShipmentItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShipmentItemRow>(
            "SELECT medication_id, quantity
             FROM shipment_items
             WHERE shipment_id = $1
             ORDER BY id ASC",
        )
        .bind(shipment_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ShipmentItem {
                medication: MedicationId::new(r.medication_id),
                quantity: r.quantity,
            })
            .collect())
    }
}
