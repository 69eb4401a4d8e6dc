//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a medical-themed interface for:
//! - Dashboard with session summary
//! - Patient data input
//! - Assessment result and report download
//! - Session history

mod app;
mod styles;
mod ui;

pub use app::{App, Screen, TuiSession};
pub use styles::MedicalTheme;
