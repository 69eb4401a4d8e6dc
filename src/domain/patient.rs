//! Patient record types for stroke risk assessment.
//!
//! Field vocabulary follows the public stroke prediction dataset
//! (gender, hypertension, heart_disease, work_type, avg_glucose_level, bmi,
//! smoking_status).

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Accepted age range in years.
pub const AGE_RANGE: RangeInclusive<u8> = 0..=120;

/// Accepted BMI range.
pub const BMI_RANGE: RangeInclusive<f64> = 10.0..=50.0;

/// Accepted average glucose range in mg/dL.
pub const GLUCOSE_RANGE: RangeInclusive<f64> = 50.0..=400.0;

/// Biological gender as captured by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Self::Male, Self::Female, Self::Other];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

/// Smoking history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmokingStatus {
    #[serde(rename = "never smoked")]
    Never,
    #[serde(rename = "formerly smoked")]
    Formerly,
    #[serde(rename = "smokes")]
    Currently,
}

impl SmokingStatus {
    pub const ALL: [SmokingStatus; 3] = [Self::Never, Self::Formerly, Self::Currently];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Never => "never smoked",
            Self::Formerly => "formerly smoked",
            Self::Currently => "smokes",
        }
    }
}

/// Employment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkType {
    Private,
    #[serde(rename = "Self-employed")]
    SelfEmployed,
    #[serde(rename = "Govt_job")]
    Govt,
    #[serde(rename = "children")]
    Children,
    #[serde(rename = "Never_worked")]
    NeverWorked,
}

impl WorkType {
    pub const ALL: [WorkType; 5] = [
        Self::Private,
        Self::SelfEmployed,
        Self::Govt,
        Self::Children,
        Self::NeverWorked,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Private => "Private",
            Self::SelfEmployed => "Self-employed",
            Self::Govt => "Govt_job",
            Self::Children => "children",
            Self::NeverWorked => "Never_worked",
        }
    }

    /// Work environments counted as high-stress by the rule table.
    #[must_use]
    pub fn is_high_stress(&self) -> bool {
        matches!(self, Self::Private | Self::SelfEmployed)
    }
}

macro_rules! impl_display_via_label {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

impl_display_via_label!(Gender, SmokingStatus, WorkType);

/// Patient attributes submitted for one assessment.
///
/// Immutable once submitted: the session stores it alongside its assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Age in years (0-120)
    pub age: u8,

    pub gender: Gender,

    /// Body Mass Index (10-50)
    pub bmi: f64,

    /// Average blood glucose in mg/dL (50-400)
    pub avg_glucose_level: f64,

    /// History of high blood pressure
    pub hypertension: bool,

    /// History of heart disease
    pub heart_disease: bool,

    pub smoking_status: SmokingStatus,

    pub work_type: WorkType,
}

impl Default for PatientRecord {
    /// Starting values shown on a fresh form.
    fn default() -> Self {
        Self {
            age: 50,
            gender: Gender::Male,
            bmi: 24.0,
            avg_glucose_level: 100.0,
            hypertension: false,
            heart_disease: false,
            smoking_status: SmokingStatus::Never,
            work_type: WorkType::Private,
        }
    }
}

impl PatientRecord {
    /// Validate that all attributes are within accepted ranges.
    ///
    /// Enumerated fields are constrained by their types; only the numeric
    /// fields need checking.
    ///
    /// # Errors
    /// Returns every violated constraint as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !AGE_RANGE.contains(&self.age) {
            errors.push(format!(
                "Age {} out of range [{}, {}]",
                self.age,
                AGE_RANGE.start(),
                AGE_RANGE.end()
            ));
        }
        if !BMI_RANGE.contains(&self.bmi) {
            errors.push(format!(
                "BMI {} out of range [{}, {}]",
                self.bmi,
                BMI_RANGE.start(),
                BMI_RANGE.end()
            ));
        }
        if !GLUCOSE_RANGE.contains(&self.avg_glucose_level) {
            errors.push(format!(
                "Average glucose {} out of range [{}, {}]",
                self.avg_glucose_level,
                GLUCOSE_RANGE.start(),
                GLUCOSE_RANGE.end()
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_valid() {
        assert!(PatientRecord::default().validate().is_ok());
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let invalid = PatientRecord {
            age: 121,
            bmi: 9.5,
            avg_glucose_level: 401.0,
            ..Default::default()
        };

        let errors = invalid.validate().expect_err("Should reject");
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("Age 121"));
    }

    #[test]
    fn test_nan_is_rejected() {
        let invalid = PatientRecord {
            bmi: f64::NAN,
            ..Default::default()
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let edge = PatientRecord {
            age: 120,
            bmi: 50.0,
            avg_glucose_level: 50.0,
            ..Default::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_serialized_labels_match_dataset_vocabulary() {
        let record = PatientRecord {
            smoking_status: SmokingStatus::Formerly,
            work_type: WorkType::SelfEmployed,
            ..Default::default()
        };
        let json = serde_json::to_string(&record).expect("Should serialize");

        assert!(json.contains("\"smoking_status\":\"formerly smoked\""));
        assert!(json.contains("\"work_type\":\"Self-employed\""));

        let back: PatientRecord = serde_json::from_str(&json).expect("Should parse");
        assert_eq!(back, record);
    }

    #[test]
    fn test_high_stress_work_types() {
        let stressed: Vec<_> = WorkType::ALL.iter().filter(|w| w.is_high_stress()).collect();
        assert_eq!(stressed, vec![&WorkType::Private, &WorkType::SelfEmployed]);
    }
}
