//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no I/O.
//! All types are serializable and implement strict validation.

mod assessment;
mod patient;
pub mod scoring;

pub use assessment::{
    HistoryEntry, RiskAssessment, RiskLevel, HIGH_RISK_THRESHOLD, MAX_RISK_SCORE,
};
pub use patient::{
    Gender, PatientRecord, SmokingStatus, WorkType, AGE_RANGE, BMI_RANGE, GLUCOSE_RANGE,
};
pub use scoring::{score_record, RiskScore};
