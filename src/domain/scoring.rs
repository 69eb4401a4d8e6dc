//! Weighted rule table for stroke risk.
//!
//! Each attribute contributes from at most one tier: the tiers of a group are
//! tried in order and the first match is the only one counted. Groups are
//! additive and evaluated in table order, which is also the order of the
//! reported risk factors.

use super::{Gender, PatientRecord, RiskAssessment, SmokingStatus, MAX_RISK_SCORE};

/// Lower bound of the cosmetic confidence percentage.
pub const CONFIDENCE_FLOOR: f64 = 85.0;

/// Width of the confidence interval; confidence stays below floor + span.
pub const CONFIDENCE_SPAN: f64 = 10.0;

/// A single weighted condition.
pub struct Rule {
    pub points: u32,
    pub label: &'static str,
    pub applies: fn(&PatientRecord) -> bool,
}

/// Rule groups in evaluation order. Tiers inside a group are mutually exclusive.
pub static RULE_TABLE: [&[Rule]; 8] = [
    &[
        Rule {
            points: 30,
            label: "Advanced age (>65)",
            applies: |r| r.age > 65,
        },
        Rule {
            points: 15,
            label: "Elevated age (50-65)",
            applies: |r| r.age > 50,
        },
    ],
    &[Rule {
        points: 25,
        label: "Hypertension",
        applies: |r| r.hypertension,
    }],
    &[Rule {
        points: 25,
        label: "Heart disease",
        applies: |r| r.heart_disease,
    }],
    &[
        Rule {
            points: 20,
            label: "High glucose level (>125 mg/dL)",
            applies: |r| r.avg_glucose_level > 125.0,
        },
        Rule {
            points: 10,
            label: "Elevated glucose level (100-125 mg/dL)",
            applies: |r| r.avg_glucose_level > 100.0,
        },
    ],
    &[
        Rule {
            points: 15,
            label: "Obesity (BMI >30)",
            applies: |r| r.bmi > 30.0,
        },
        Rule {
            points: 8,
            label: "Overweight (BMI 25-30)",
            applies: |r| r.bmi > 25.0,
        },
    ],
    &[
        Rule {
            points: 20,
            label: "Current smoker",
            applies: |r| r.smoking_status == SmokingStatus::Currently,
        },
        Rule {
            points: 10,
            label: "Former smoker",
            applies: |r| r.smoking_status == SmokingStatus::Formerly,
        },
    ],
    &[Rule {
        points: 5,
        label: "Male gender",
        applies: |r| r.gender == Gender::Male,
    }],
    &[Rule {
        points: 5,
        label: "High-stress work environment",
        applies: |r| r.work_type.is_high_stress(),
    }],
];

/// Deterministic part of an assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskScore {
    /// Unclamped sum of fired rule points
    pub raw: u32,
    /// Sum clamped to 100
    pub clamped: u8,
    /// Labels of fired rules, in table order
    pub factors: Vec<String>,
}

/// Score a record against the rule table.
#[must_use]
pub fn score_record(record: &PatientRecord) -> RiskScore {
    let mut raw = 0;
    let mut factors = Vec::new();

    for group in &RULE_TABLE {
        if let Some(rule) = group.iter().find(|rule| (rule.applies)(record)) {
            raw += rule.points;
            factors.push(rule.label.to_string());
        }
    }

    // Bounded by MAX_RISK_SCORE, so the narrowing cannot truncate.
    let clamped = raw.min(u32::from(MAX_RISK_SCORE)) as u8;

    RiskScore {
        raw,
        clamped,
        factors,
    }
}

/// Map a uniform sample in [0, 1) onto the confidence interval [85, 95).
///
/// Samples outside [0, 1) are pulled back inside. Samples just below 1 round to
/// the ceiling in f64, so the result is capped at the largest value below 95.
#[must_use]
pub fn confidence_from_unit(sample: f64) -> f64 {
    let unit = if sample.is_nan() {
        0.0
    } else {
        sample.clamp(0.0, 1.0)
    };
    let ceiling = CONFIDENCE_FLOOR + CONFIDENCE_SPAN;
    let confidence = CONFIDENCE_FLOOR + CONFIDENCE_SPAN * unit;
    if confidence >= ceiling {
        f64::from_bits(ceiling.to_bits() - 1)
    } else {
        confidence
    }
}

/// Build a full assessment from a record and a uniform confidence sample.
#[must_use]
pub fn assess(record: &PatientRecord, confidence_sample: f64) -> RiskAssessment {
    let score = score_record(record);
    RiskAssessment::new(
        score.clamped,
        score.factors,
        confidence_from_unit(confidence_sample),
    )
}
