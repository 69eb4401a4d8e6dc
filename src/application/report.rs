//! Plain-text assessment report.
//!
//! The report is generated on demand and written to the configured report
//! directory. It is the only file the application produces besides its log.

use std::path::{Path, PathBuf};

use crate::domain::{PatientRecord, RiskAssessment};
use crate::StrokecheckError;

/// File name used when saving a report.
pub const REPORT_FILE_NAME: &str = "stroke_risk_report.txt";

/// Render the report text for one assessment.
///
/// # Errors
/// Returns `StrokecheckError::Serialization` if the record cannot be dumped.
pub fn render_report(
    record: &PatientRecord,
    assessment: &RiskAssessment,
) -> Result<String, StrokecheckError> {
    let patient_data = serde_json::to_string(record)?;

    let factors: String = assessment
        .risk_factors
        .iter()
        .map(|factor| format!("- {factor}\n"))
        .collect();

    Ok(format!(
        "Stroke Risk Assessment Report\n\
         ============================\n\
         \n\
         Risk Level: {level}\n\
         Risk Score: {score}/100\n\
         Confidence: {confidence:.1}%\n\
         Recommendation: {recommendation}\n\
         \n\
         Risk Factors:\n\
         {factors}\n\
         Patient Data: {patient_data}\n",
        level = assessment.risk_level,
        score = assessment.risk_score,
        confidence = assessment.confidence,
        recommendation = assessment.recommendation,
    ))
}

/// Render and write the report into `dir`, replacing any previous report.
///
/// # Errors
/// Returns `StrokecheckError::Io` if the directory or file cannot be written.
pub fn save_report(
    dir: &Path,
    record: &PatientRecord,
    assessment: &RiskAssessment,
) -> Result<PathBuf, StrokecheckError> {
    let report = render_report(record, assessment)?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(REPORT_FILE_NAME);
    std::fs::write(&path, report)?;

    tracing::info!("Report saved to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scoring::assess;
    use crate::domain::{Gender, SmokingStatus, WorkType};

    fn high_risk() -> PatientRecord {
        PatientRecord {
            age: 70,
            gender: Gender::Male,
            bmi: 32.0,
            avg_glucose_level: 130.0,
            hypertension: true,
            heart_disease: false,
            smoking_status: SmokingStatus::Currently,
            work_type: WorkType::Private,
        }
    }

    #[test]
    fn test_report_layout() {
        let record = high_risk();
        let assessment = assess(&record, 0.5);
        let report = render_report(&record, &assessment).expect("Should render");

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "Stroke Risk Assessment Report");
        assert_eq!(lines[1], "============================");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Risk Level: High");
        assert_eq!(lines[4], "Risk Score: 100/100");
        assert_eq!(lines[5], "Confidence: 90.0%");
        assert_eq!(
            lines[6],
            format!("Recommendation: {}", assessment.recommendation)
        );
        assert_eq!(lines[8], "Risk Factors:");
        assert_eq!(lines[9], "- Advanced age (>65)");
        assert_eq!(lines[15], "- High-stress work environment");
        assert_eq!(lines[16], "");
        assert!(lines[17].starts_with("Patient Data: {\"age\":70"));
        assert!(lines[17].contains("\"smoking_status\":\"smokes\""));
    }

    #[test]
    fn test_report_without_factors() {
        let record = PatientRecord {
            age: 30,
            gender: Gender::Female,
            bmi: 22.0,
            avg_glucose_level: 90.0,
            hypertension: false,
            heart_disease: false,
            smoking_status: SmokingStatus::Never,
            work_type: WorkType::Children,
        };
        let assessment = assess(&record, 0.0);
        let report = render_report(&record, &assessment).expect("Should render");

        assert!(report.contains("Risk Level: Low\n"));
        assert!(report.contains("Risk Score: 0/100\n"));
        assert!(report.contains("Confidence: 85.0%\n"));
        assert!(report.contains("Risk Factors:\n\nPatient Data: "));
    }

    #[test]
    fn test_save_report_writes_file() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let target = dir.path().join("reports");
        let record = high_risk();
        let assessment = assess(&record, 0.25);

        let path = save_report(&target, &record, &assessment).expect("Should save");

        assert_eq!(path, target.join(REPORT_FILE_NAME));
        let written = std::fs::read_to_string(&path).expect("Should read back");
        assert_eq!(
            written,
            render_report(&record, &assessment).expect("Should render")
        );
    }
}
