//! Session summary: aggregate figures over the assessment history.

use crate::domain::{HistoryEntry, RiskLevel};

/// Aggregate statistics for the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    /// Number of assessments in the session
    pub total: usize,
    pub high: usize,
    pub low: usize,
    /// Mean clamped score (0 when empty)
    pub mean_score: f64,
    /// Mean confidence percentage (0 when empty)
    pub mean_confidence: f64,
    /// Level of the most recent assessment
    pub latest_level: Option<RiskLevel>,
}

impl SessionSummary {
    /// Summarize entries given most recent first.
    #[must_use]
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }

        let total = entries.len();
        let high = entries
            .iter()
            .filter(|e| e.assessment.risk_level == RiskLevel::High)
            .count();
        let score_sum: f64 = entries
            .iter()
            .map(|e| f64::from(e.assessment.risk_score))
            .sum();
        let confidence_sum: f64 = entries.iter().map(|e| e.assessment.confidence).sum();

        Self {
            total,
            high,
            low: total - high,
            mean_score: score_sum / total as f64,
            mean_confidence: confidence_sum / total as f64,
            latest_level: entries.first().map(|e| e.assessment.risk_level),
        }
    }

    /// Fraction of high-risk results (0 when empty).
    #[must_use]
    pub fn high_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.high as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PatientRecord, RiskAssessment};

    fn entry(sequence: usize, score: u8, confidence: f64) -> HistoryEntry {
        HistoryEntry::new(
            sequence,
            PatientRecord::default(),
            RiskAssessment::new(score, Vec::new(), confidence),
        )
    }

    #[test]
    fn test_empty_summary() {
        let summary = SessionSummary::from_entries(&[]);
        assert_eq!(summary, SessionSummary::default());
        assert_eq!(summary.high_rate(), 0.0);
        assert!(summary.latest_level.is_none());
    }

    #[test]
    fn test_summary_counts_and_means() {
        // Most recent first
        let entries = vec![entry(3, 80, 90.0), entry(2, 20, 86.0), entry(1, 50, 94.0)];
        let summary = SessionSummary::from_entries(&entries);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.high, 2);
        assert_eq!(summary.low, 1);
        assert!((summary.mean_score - 50.0).abs() < 1e-9);
        assert!((summary.mean_confidence - 90.0).abs() < 1e-9);
        assert_eq!(summary.latest_level, Some(RiskLevel::High));
        assert!((summary.high_rate() - 2.0 / 3.0).abs() < 1e-9);
    }
}
