//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and its collaborators (session storage, randomness).

mod confidence;
mod history;

pub use confidence::ConfidenceSource;
pub use history::{HistoryPage, HistoryStore};
