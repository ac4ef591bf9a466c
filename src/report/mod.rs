//! Report module - diagnostic tables and machine-readable exports.

pub mod fairness;
pub mod missing;
pub mod summary;
pub mod vif_report;

pub use fairness::*;
pub use missing::*;
pub use summary::*;
pub use vif_report::*;
