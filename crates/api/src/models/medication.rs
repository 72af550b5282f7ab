//! Medication domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use vitala_core::{MedicationId, MedicationStatus};

/// A medication course prescribed to a user.
#[derive(Debug, Clone, Serialize)]
pub struct Medication {
    /// Unique medication ID.
    pub id: MedicationId,
    /// Medication name.
    pub name: String,
    /// Dose per administration (free-form, e.g. "0.25 mg").
    pub dosage: String,
    /// Administration frequency (free-form, e.g. "weekly").
    pub frequency: String,
    /// When the course starts.
    #[serde(rename = "startDate")]
    pub start_date: DateTime<Utc>,
    /// When the course ends, if bounded.
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    /// Course status.
    pub status: MedicationStatus,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
