//! Expanse Test Harness - Scenario simulation and validation
//!
//! This crate provides:
//! - Scenario simulation over a full `SpaceTime`
//! - Frame time jitter for unevenly spaced histories
//! - Predefined scenarios (static, linear, ΛCDM, decaying light)

pub mod scenario;

pub use scenario::*;
