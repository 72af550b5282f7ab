//! Profile submission validation and BMI derivation.
//!
//! Both profile-update routes funnel through [`ProfileUpdate::validate`];
//! they differ only in whether a display name is required.

use thiserror::Error;

use vitala_core::{BiologicalSex, Bmi};

/// Inclusive age bounds, in years.
const AGE_RANGE: (i32, i32) = (13, 120);
/// Inclusive height bounds, in centimeters.
const HEIGHT_RANGE: (f64, f64) = (100.0, 250.0);
/// Inclusive weight bounds, in kilograms.
const WEIGHT_RANGE: (f64, f64) = (20.0, 300.0);

/// Errors from profile validation. One violation per response; the first
/// failing check wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error(
        "Please provide all required fields: age, height_cm, biological_sex, and current_weight_kg"
    )]
    MissingFields,

    #[error("Age must be between 13 and 120")]
    AgeOutOfRange,

    #[error("Height must be between 100cm and 250cm")]
    HeightOutOfRange,

    #[error("Weight must be between 20kg and 300kg")]
    WeightOutOfRange,

    #[error("Biological sex must be Male, Female, or Other")]
    InvalidBiologicalSex,
}

/// Whether the route variant requires a display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    Required,
    Optional,
}

/// Raw profile submission, straight from the request body.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub biological_sex: Option<String>,
    pub current_weight_kg: Option<f64>,
    pub goal_weight_kg: Option<f64>,
}

/// A fully validated profile change, carrying the derived BMI.
///
/// Construction via [`ProfileUpdate::validate`] is the only way to get one,
/// so the BMI is always consistent with the height and weight being stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProfile {
    pub name: Option<String>,
    pub age: i32,
    pub height_cm: f64,
    pub biological_sex: BiologicalSex,
    pub current_weight_kg: f64,
    pub goal_weight_kg: Option<f64>,
    pub bmi: Bmi,
}

impl ProfileUpdate {
    /// Validate a submission, checking in order: required fields, age range,
    /// height range, weight range, biological sex.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a `ProfileError`.
    pub fn validate(self, name_rule: NameRule) -> Result<ValidatedProfile, ProfileError> {
        let name_missing = name_rule == NameRule::Required
            && self.name.as_deref().is_none_or(|n| n.is_empty());

        let (Some(age), Some(height_cm), Some(sex), Some(current_weight_kg)) = (
            self.age,
            self.height_cm,
            self.biological_sex.as_deref().filter(|s| !s.is_empty()),
            self.current_weight_kg,
        ) else {
            return Err(ProfileError::MissingFields);
        };

        if name_missing {
            return Err(ProfileError::MissingFields);
        }

        if !(AGE_RANGE.0..=AGE_RANGE.1).contains(&age) {
            return Err(ProfileError::AgeOutOfRange);
        }

        if !(HEIGHT_RANGE.0..=HEIGHT_RANGE.1).contains(&height_cm) {
            return Err(ProfileError::HeightOutOfRange);
        }

        if !(WEIGHT_RANGE.0..=WEIGHT_RANGE.1).contains(&current_weight_kg) {
            return Err(ProfileError::WeightOutOfRange);
        }

        let biological_sex = sex
            .parse::<BiologicalSex>()
            .map_err(|_| ProfileError::InvalidBiologicalSex)?;

        let bmi = Bmi::compute(height_cm, current_weight_kg);

        Ok(ValidatedProfile {
            name: self.name,
            age,
            height_cm,
            biological_sex,
            current_weight_kg,
            goal_weight_kg: self.goal_weight_kg,
            bmi,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use vitala_core::BmiCategory;

    fn complete() -> ProfileUpdate {
        ProfileUpdate {
            name: Some("Alex".to_owned()),
            age: Some(30),
            height_cm: Some(170.0),
            biological_sex: Some("Female".to_owned()),
            current_weight_kg: Some(65.0),
            goal_weight_kg: Some(60.0),
        }
    }

    #[test]
    fn test_valid_submission() {
        let profile = complete().validate(NameRule::Optional).unwrap();
        assert_eq!(profile.age, 30);
        assert_eq!(profile.biological_sex, BiologicalSex::Female);
        // 65 / 1.7^2 = 22.49...
        assert!((profile.bmi.value - 22.49).abs() < 0.01);
        assert_eq!(profile.bmi.category, BmiCategory::Normal);
    }

    #[test]
    fn test_missing_required_field() {
        let update = ProfileUpdate {
            age: None,
            ..complete()
        };
        assert_eq!(
            update.validate(NameRule::Optional),
            Err(ProfileError::MissingFields)
        );
    }

    #[test]
    fn test_name_rule_required() {
        let update = ProfileUpdate {
            name: None,
            ..complete()
        };
        assert_eq!(
            update.clone().validate(NameRule::Required),
            Err(ProfileError::MissingFields)
        );
        assert!(update.validate(NameRule::Optional).is_ok());
    }

    #[test]
    fn test_empty_name_counts_as_missing_when_required() {
        let update = ProfileUpdate {
            name: Some(String::new()),
            ..complete()
        };
        assert_eq!(
            update.validate(NameRule::Required),
            Err(ProfileError::MissingFields)
        );
    }

    #[test]
    fn test_age_bounds_inclusive() {
        let at = |age: i32| ProfileUpdate {
            age: Some(age),
            ..complete()
        };
        assert_eq!(
            at(12).validate(NameRule::Optional),
            Err(ProfileError::AgeOutOfRange)
        );
        assert!(at(13).validate(NameRule::Optional).is_ok());
        assert!(at(120).validate(NameRule::Optional).is_ok());
        assert_eq!(
            at(121).validate(NameRule::Optional),
            Err(ProfileError::AgeOutOfRange)
        );
    }

    #[test]
    fn test_age_rejected_even_with_other_fields_invalid() {
        // Age is checked before height/weight/sex, so it wins
        let update = ProfileUpdate {
            age: Some(12),
            height_cm: Some(999.0),
            biological_sex: Some("Unknown".to_owned()),
            ..complete()
        };
        assert_eq!(
            update.validate(NameRule::Optional),
            Err(ProfileError::AgeOutOfRange)
        );
    }

    #[test]
    fn test_height_bounds_inclusive() {
        let at = |height: f64| ProfileUpdate {
            height_cm: Some(height),
            ..complete()
        };
        assert_eq!(
            at(99.9).validate(NameRule::Optional),
            Err(ProfileError::HeightOutOfRange)
        );
        assert!(at(100.0).validate(NameRule::Optional).is_ok());
        assert!(at(250.0).validate(NameRule::Optional).is_ok());
        assert_eq!(
            at(250.1).validate(NameRule::Optional),
            Err(ProfileError::HeightOutOfRange)
        );
    }

    #[test]
    fn test_weight_bounds_inclusive() {
        let at = |weight: f64| ProfileUpdate {
            current_weight_kg: Some(weight),
            ..complete()
        };
        assert_eq!(
            at(19.9).validate(NameRule::Optional),
            Err(ProfileError::WeightOutOfRange)
        );
        assert!(at(20.0).validate(NameRule::Optional).is_ok());
        assert!(at(300.0).validate(NameRule::Optional).is_ok());
        assert_eq!(
            at(300.5).validate(NameRule::Optional),
            Err(ProfileError::WeightOutOfRange)
        );
    }

    #[test]
    fn test_invalid_biological_sex() {
        let update = ProfileUpdate {
            biological_sex: Some("female".to_owned()),
            ..complete()
        };
        assert_eq!(
            update.validate(NameRule::Optional),
            Err(ProfileError::InvalidBiologicalSex)
        );
    }

    #[test]
    fn test_goal_weight_is_passed_through() {
        let update = ProfileUpdate {
            goal_weight_kg: None,
            ..complete()
        };
        let profile = update.validate(NameRule::Optional).unwrap();
        assert!(profile.goal_weight_kg.is_none());
    }
}
