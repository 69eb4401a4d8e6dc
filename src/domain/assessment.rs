//! Assessment result types.
//!
//! Represents the output of the stroke risk rule table.

use serde::{Deserialize, Serialize};

use super::PatientRecord;

/// Score at or above which a patient is classified as high risk.
pub const HIGH_RISK_THRESHOLD: u8 = 50;

/// Upper bound of the clamped risk score.
pub const MAX_RISK_SCORE: u8 = 100;

/// Risk level classification for stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Score below the threshold
    Low,
    /// Score at or above the threshold
    High,
}

impl RiskLevel {
    /// Classify a clamped risk score.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_RISK_THRESHOLD {
            Self::High
        } else {
            Self::Low
        }
    }

    /// Fixed recommendation text for this level.
    #[must_use]
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Low => {
                "Low risk of stroke. Continue maintaining healthy lifestyle habits and regular check-ups."
            }
            Self::High => {
                "High risk of stroke detected! Immediate medical consultation recommended. Consider lifestyle modifications and medical intervention."
            }
        }
    }

    /// Binary prediction mirroring the level (1 = high risk).
    #[must_use]
    pub fn prediction(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Result of evaluating one patient record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Clamped score (0 to 100)
    pub risk_score: u8,

    /// Classification derived from `risk_score`
    pub risk_level: RiskLevel,

    /// Labels of the rules that fired, in evaluation order
    pub risk_factors: Vec<String>,

    /// Recommendation text for `risk_level`
    pub recommendation: String,

    /// Cosmetic confidence percentage in [85, 95)
    pub confidence: f64,

    /// Binary prediction (0 = low, 1 = high)
    pub prediction: u8,
}

impl RiskAssessment {
    /// Build an assessment from a clamped score and the factors that produced it.
    ///
    /// Level, prediction and recommendation are all derived from `risk_score`.
    #[must_use]
    pub fn new(risk_score: u8, risk_factors: Vec<String>, confidence: f64) -> Self {
        let risk_score = risk_score.min(MAX_RISK_SCORE);
        let risk_level = RiskLevel::from_score(risk_score);
        Self {
            risk_score,
            risk_level,
            risk_factors,
            recommendation: risk_level.recommendation().to_string(),
            confidence,
            prediction: risk_level.prediction(),
        }
    }

    /// Score as a fraction for gauges.
    #[must_use]
    pub fn score_ratio(&self) -> f64 {
        f64::from(self.risk_score) / f64::from(MAX_RISK_SCORE)
    }
}

/// One submitted record and its assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 1-based submission number within the session
    pub sequence: usize,

    pub record: PatientRecord,

    pub assessment: RiskAssessment,

    /// Timestamp of submission
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(sequence: usize, record: PatientRecord, assessment: RiskAssessment) -> Self {
        Self {
            sequence,
            record,
            assessment,
            created_at: chrono::Utc::now(),
        }
    }
}
