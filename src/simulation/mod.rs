//! Synthetic data generation for stress testing the engine.

pub mod synthetic;
