//! Canonical record types shared across the engine.

pub mod category;
pub mod isin;
pub mod price_map;
pub mod reference;
pub mod run;
pub mod sources;
pub mod store;
