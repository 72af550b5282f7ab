//! Weight log domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use vitala_core::WeightEntryId;

/// A single logged weight measurement.
///
/// Owned by a user; the read path always scopes queries to the owner, so the
/// owning reference doesn't ride along on the domain type.
#[derive(Debug, Clone, Serialize)]
pub struct WeightEntry {
    /// Unique entry ID.
    pub id: WeightEntryId,
    /// Measured weight in kilograms.
    pub weight_kg: f64,
    /// When the measurement was taken (defaults to creation time).
    pub date: DateTime<Utc>,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
