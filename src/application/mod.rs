//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod evaluator;
pub mod report;
mod session;
mod summary;

pub use evaluator::evaluate;
pub use report::{render_report, save_report, REPORT_FILE_NAME};
pub use session::AssessmentSession;
pub use summary::SessionSummary;
