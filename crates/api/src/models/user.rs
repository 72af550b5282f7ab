//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use vitala_core::{BiologicalSex, BmiCategory, Email, UserId};

/// A Vitala user (domain type).
///
/// The password hash never leaves the repository layer; this type is safe to
/// serialize into responses as-is.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name, set during profile completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Age in years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    /// Height in centimeters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// Biological sex.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biological_sex: Option<BiologicalSex>,
    /// Weight at the start of the program, in kilograms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_weight_kg: Option<f64>,
    /// Current weight in kilograms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_weight_kg: Option<f64>,
    /// Goal weight in kilograms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_weight_kg: Option<f64>,
    /// Derived BMI. Always written together with `bmi_category` by the
    /// profile-update path; never set independently.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    /// Derived BMI category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi_category: Option<BmiCategory>,
    /// Whether the biometric profile has been completed.
    pub is_profile_completed: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
