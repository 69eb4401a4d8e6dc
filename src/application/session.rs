//! Assessment session: the explicit context for one user session.
//!
//! This service coordinates:
//! - Boundary validation
//! - Evaluation
//! - History bookkeeping
//!
//! The caller creates a session when the user session starts and drops it when
//! it ends; the history goes with it.

use crate::domain::{HistoryEntry, PatientRecord};
use crate::ports::{ConfidenceSource, HistoryPage, HistoryStore};
use crate::StrokecheckError;

use super::evaluator::evaluate;
use super::summary::SessionSummary;

/// Session context owning the confidence source and the history store.
pub struct AssessmentSession<C, H>
where
    C: ConfidenceSource,
    H: HistoryStore,
{
    confidence: C,
    history: H,
}

impl<C, H> AssessmentSession<C, H>
where
    C: ConfidenceSource,
    H: HistoryStore,
{
    /// Create a new session.
    pub fn new(confidence: C, history: H) -> Self {
        Self {
            confidence,
            history,
        }
    }

    /// Validate, evaluate and record one submission.
    ///
    /// # Errors
    /// Returns `StrokecheckError::Validation` listing every violated constraint.
    /// Nothing is recorded in that case.
    pub fn assess(&mut self, record: PatientRecord) -> Result<HistoryEntry, StrokecheckError> {
        if let Err(errors) = record.validate() {
            tracing::warn!("Rejected submission with {} invalid field(s)", errors.len());
            return Err(StrokecheckError::Validation(errors.join(", ")));
        }

        let assessment = evaluate(&record, &mut self.confidence);
        let entry = HistoryEntry::new(self.history.len() + 1, record, assessment);

        tracing::info!(
            "Assessment {} complete: score={}, level={}, factors={}, confidence={:.1}%",
            entry.sequence,
            entry.assessment.risk_score,
            entry.assessment.risk_level,
            entry.assessment.risk_factors.len(),
            entry.assessment.confidence
        );

        self.history.append(entry.clone());
        Ok(entry)
    }

    /// All past assessments, most recent first.
    #[must_use]
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.list_all()
    }

    /// One page of past assessments, most recent first.
    #[must_use]
    pub fn history_page(&self, offset: usize, limit: usize) -> HistoryPage {
        self.history.page(offset, limit)
    }

    /// Most recent assessment, if any.
    #[must_use]
    pub fn latest(&self) -> Option<HistoryEntry> {
        self.history.latest()
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.history.len()
    }

    /// Aggregate view over the whole session.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_entries(&self.history.list_all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedConfidence, SessionHistory};
    use crate::domain::{Gender, RiskLevel, SmokingStatus, WorkType};

    fn create_test_session() -> AssessmentSession<FixedConfidence, SessionHistory> {
        AssessmentSession::new(FixedConfidence(0.5), SessionHistory::new())
    }

    fn low_risk() -> PatientRecord {
        PatientRecord {
            age: 30,
            gender: Gender::Female,
            bmi: 22.0,
            avg_glucose_level: 90.0,
            hypertension: false,
            heart_disease: false,
            smoking_status: SmokingStatus::Never,
            work_type: WorkType::Children,
        }
    }

    #[test]
    fn test_assess_records_entry() {
        let mut session = create_test_session();
        assert_eq!(session.entry_count(), 0);

        let entry = session.assess(low_risk()).expect("Should assess");

        assert_eq!(entry.sequence, 1);
        assert_eq!(entry.assessment.risk_level, RiskLevel::Low);
        assert_eq!(entry.record, low_risk());
        assert_eq!(session.entry_count(), 1);
        assert_eq!(session.latest().map(|e| e.sequence), Some(1));
    }

    #[test]
    fn test_history_is_reverse_submission_order() {
        let mut session = create_test_session();
        for age in [20u8, 55, 70, 40] {
            session
                .assess(PatientRecord { age, ..low_risk() })
                .expect("Should assess");
        }

        let history = session.history();
        assert_eq!(history.len(), 4);
        let ages: Vec<u8> = history.iter().map(|e| e.record.age).collect();
        assert_eq!(ages, vec![40, 70, 55, 20]);
        let sequences: Vec<usize> = history.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_invalid_record_is_rejected_without_recording() {
        let mut session = create_test_session();
        session.assess(low_risk()).expect("Should assess");

        let invalid = PatientRecord {
            age: 130,
            avg_glucose_level: 20.0,
            ..low_risk()
        };
        let err = session.assess(invalid).expect_err("Should reject");

        match err {
            StrokecheckError::Validation(msg) => {
                assert!(msg.contains("Age 130"));
                assert!(msg.contains("glucose"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(session.entry_count(), 1);
    }

    #[test]
    fn test_history_page_delegates_to_store() {
        let mut session = create_test_session();
        for _ in 0..5 {
            session.assess(low_risk()).expect("Should assess");
        }

        let page = session.history_page(2, 2);
        assert_eq!(page.total_count, 5);
        let sequences: Vec<usize> = page.items.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![3, 2]);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = create_test_session();
        let second = create_test_session();

        first.assess(low_risk()).expect("Should assess");

        assert_eq!(first.entry_count(), 1);
        assert_eq!(second.entry_count(), 0);
    }
}
