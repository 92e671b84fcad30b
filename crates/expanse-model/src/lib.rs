//! Expanse Model - Scale factor evolution
//!
//! This crate implements the expansion model:
//! - Expansion laws (static, constant-rate, flat ΛCDM)
//! - Light speed laws (constant, geometric decay)
//! - ExpansionModel: owns the scale factor and light speed histories
//!   and advances them once per simulation tick

pub mod config;
pub mod model;

pub use config::*;
pub use model::*;
