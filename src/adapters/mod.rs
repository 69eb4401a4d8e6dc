//! Adapters layer: Concrete implementations of ports.
//!
//! - `memory`: session-lifetime history store
//! - `random`: `rand`-backed confidence source
//! - `sanitize`: patient-data redaction for logs

pub mod memory;
pub mod random;
pub mod sanitize;

pub use memory::SessionHistory;
pub use random::{FixedConfidence, RngConfidence};
