//! # Strokecheck
//!
//! Heuristic stroke-risk assessment with a session-scoped history.
//!
//! This crate provides:
//! - A fixed weighted rule table that scores a patient record
//! - An explicit assessment session that owns the history of past results
//! - Plain-text report generation
//! - Terminal UI for interactive use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types and the scoring rules (PatientRecord, RiskAssessment)
//! - `ports`: Trait definitions for the history store and the confidence source
//! - `adapters`: Concrete implementations (in-memory history, rand, log sanitizer)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{HistoryEntry, PatientRecord, RiskAssessment, RiskLevel};

/// Result type for Strokecheck operations
pub type Result<T> = std::result::Result<T, StrokecheckError>;

/// Main error type for Strokecheck
#[derive(Debug, thiserror::Error)]
pub enum StrokecheckError {
    #[error("Invalid patient data: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
