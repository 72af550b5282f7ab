//! Shipment domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use vitala_core::{MedicationId, ShipmentId, ShipmentStatus};

/// A medication shipment scheduled for a user.
#[derive(Debug, Clone, Serialize)]
pub struct Shipment {
    /// Unique shipment ID.
    pub id: ShipmentId,
    /// When the shipment is scheduled to go out.
    #[serde(rename = "scheduledDate")]
    pub scheduled_date: DateTime<Utc>,
    /// Fulfillment status.
    pub status: ShipmentStatus,
    /// Medications included in this shipment.
    pub items: Vec<ShipmentItem>,
    /// Carrier tracking number, if assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
}

/// One medication line within a shipment.
#[derive(Debug, Clone, Serialize)]
pub struct ShipmentItem {
    /// The medication being shipped.
    pub medication: MedicationId,
    /// Number of units.
    pub quantity: i32,
}
