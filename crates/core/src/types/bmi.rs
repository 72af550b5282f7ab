//! Body Mass Index derivation.
//!
//! BMI and its category are always derived together from height and current
//! weight; they are never stored or set independently.

use core::fmt;

use serde::{Deserialize, Serialize};

/// BMI category thresholds (half-open intervals).
///
/// - `bmi < 18.5` -> Underweight
/// - `18.5 <= bmi < 25` -> Normal
/// - `25 <= bmi < 30` -> Overweight
/// - `bmi >= 30` -> Obese
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Categorize a BMI value.
    #[must_use]
    pub fn from_value(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Returns the category name as stored and serialized.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BmiCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Underweight" => Ok(Self::Underweight),
            "Normal" => Ok(Self::Normal),
            "Overweight" => Ok(Self::Overweight),
            "Obese" => Ok(Self::Obese),
            other => Err(UnknownVariant {
                field: "bmi_category",
                value: other.to_owned(),
            }),
        }
    }
}

/// Error returned when a stored string doesn't match any enum variant.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown {field} value: {value}")]
pub struct UnknownVariant {
    /// Which field held the unrecognized value.
    pub field: &'static str,
    /// The unrecognized value itself.
    pub value: String,
}

/// A derived BMI value with its category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bmi {
    /// BMI value, `weight_kg / height_m^2`.
    pub value: f64,
    /// Category per the half-open threshold table.
    pub category: BmiCategory,
}

impl Bmi {
    /// Compute BMI from height in centimeters and weight in kilograms.
    ///
    /// Callers are expected to have range-validated both inputs; this only
    /// performs the derivation.
    #[must_use]
    pub fn compute(height_cm: f64, weight_kg: f64) -> Self {
        let height_m = height_cm / 100.0;
        let value = weight_kg / (height_m * height_m);

        Self {
            value,
            category: BmiCategory::from_value(value),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_formula() {
        let bmi = Bmi::compute(180.0, 81.0);
        assert!((bmi.value - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(BmiCategory::from_value(18.499), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_value(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_value(24.999), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_value(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_value(29.999), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_value(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_boundary_is_not_rounded() {
        // 53.465 kg at 170 cm is ~18.5000, which lands in Normal, not
        // Underweight
        let bmi = Bmi::compute(170.0, 53.465);
        assert!(bmi.value >= 18.5);
        assert_eq!(bmi.category, BmiCategory::Normal);
    }

    #[test]
    fn test_exact_threshold_at_180cm() {
        // 81 kg at 180 cm is exactly 25.0 -> Overweight
        let bmi = Bmi::compute(180.0, 81.0);
        assert_eq!(bmi.category, BmiCategory::Overweight);
    }

    #[test]
    fn test_category_as_str_roundtrip() {
        for category in [
            BmiCategory::Underweight,
            BmiCategory::Normal,
            BmiCategory::Overweight,
            BmiCategory::Obese,
        ] {
            let parsed: BmiCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_category_from_str_rejects_unknown() {
        assert!("Skinny".parse::<BmiCategory>().is_err());
        assert!("normal".parse::<BmiCategory>().is_err());
    }

    #[test]
    fn test_serde_uses_capitalized_names() {
        let json = serde_json::to_string(&BmiCategory::Underweight).unwrap();
        assert_eq!(json, "\"Underweight\"");
    }
}
