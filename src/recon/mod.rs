//! Per-category reconciliation rules and the run orchestrator.

pub mod corporate;
pub mod lookup;
pub mod mismatch;
pub mod orchestrator;
pub mod report;
pub mod treasury;
