//! # valuation-recon
//!
//! Market-data cross-checking engine for securities valuation runs.
//!
//! Given one run's canonical record sets, a reference valuation sheet
//! plus independent market-price feeds, this engine compares stated
//! prices per instrument category and reports every ISIN whose price
//! differs beyond tolerance or lacks corroborating data.
//!
//! ## Architecture
//!
//! - **core** — Canonical records: ISINs, categories, reference rows,
//!   source quotes, the price map, the run container and store trait
//! - **curve** — Tenor parsing and yield-curve interpolation
//! - **recon** — Per-category comparison rules, reports, orchestration
//! - **simulation** — Synthetic run generation for stress testing

pub mod core;
pub mod curve;
pub mod recon;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::category::Category;
    pub use crate::core::isin::Isin;
    pub use crate::core::reference::ReferenceRecord;
    pub use crate::core::run::{RunId, ValuationRun};
    pub use crate::core::store::{MarketDataStore, StoreError};
    pub use crate::recon::mismatch::{Mismatch, MismatchStatus};
    pub use crate::recon::orchestrator::{run_reconciliation, RunManifest};
    pub use crate::recon::report::ReconReport;
}
