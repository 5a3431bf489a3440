//! Tenor parsing and yield-curve interpolation.

pub mod interpolate;
pub mod tenor;
