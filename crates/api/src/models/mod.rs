//! Domain models.
//!
//! These types represent validated domain objects separate from database row
//! types. Row structs live next to the queries in [`crate::db`].

pub mod medication;
pub mod shipment;
pub mod user;
pub mod weight;

pub use medication::Medication;
pub use shipment::{Shipment, ShipmentItem};
pub use user::User;
pub use weight::WeightEntry;
