//! Status enums for various entities.
//!
//! All of these are stored as text; conversion to and from the stored form
//! goes through `as_str`/`FromStr` so unknown database values surface as
//! errors instead of panics.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::bmi::UnknownVariant;

/// Biological sex recorded on a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiologicalSex {
    Male,
    Female,
    Other,
}

impl BiologicalSex {
    /// Returns the value as stored and serialized.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for BiologicalSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BiologicalSex {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            "Other" => Ok(Self::Other),
            other => Err(UnknownVariant {
                field: "biological_sex",
                value: other.to_owned(),
            }),
        }
    }
}

/// Shipment fulfillment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl ShipmentStatus {
    /// Returns the value as stored and serialized.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShipmentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownVariant {
                field: "shipment status",
                value: other.to_owned(),
            }),
        }
    }
}

/// Medication course status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MedicationStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl MedicationStatus {
    /// Returns the value as stored and serialized.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for MedicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MedicationStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownVariant {
                field: "medication status",
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_biological_sex_roundtrip() {
        for sex in [
            BiologicalSex::Male,
            BiologicalSex::Female,
            BiologicalSex::Other,
        ] {
            let parsed: BiologicalSex = sex.as_str().parse().unwrap();
            assert_eq!(parsed, sex);
        }
    }

    #[test]
    fn test_biological_sex_is_case_sensitive() {
        assert!("male".parse::<BiologicalSex>().is_err());
        assert!("MALE".parse::<BiologicalSex>().is_err());
    }

    #[test]
    fn test_shipment_status_serde_lowercase() {
        let json = serde_json::to_string(&ShipmentStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        let parsed: ShipmentStatus = serde_json::from_str("\"delivered\"").unwrap();
        assert_eq!(parsed, ShipmentStatus::Delivered);
    }

    #[test]
    fn test_medication_status_roundtrip() {
        for status in [
            MedicationStatus::Active,
            MedicationStatus::Completed,
            MedicationStatus::Cancelled,
        ] {
            let parsed: MedicationStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        assert!("failed".parse::<ShipmentStatus>().is_err());
        assert!("paused".parse::<MedicationStatus>().is_err());
    }
}
