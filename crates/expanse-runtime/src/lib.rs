//! Expanse Runtime - Headless driver and persistence
//!
//! This crate implements the tick loop around the simulation core:
//! 1. Advance the expansion model (only while running)
//! 2. Advance simulation time
//! 3. Record scalar readings for graph overlays
//! 4. Run periodic hooks
//! 5. Persist snapshots at the configured interval
//!
//! Rendering and input handling stay outside; they read projections and
//! scalar readings from the `Simulator`.

pub mod config;
pub mod error;
pub mod field;
pub mod history;
pub mod persist;
pub mod simulator;

pub use config::*;
pub use error::*;
pub use field::*;
pub use history::*;
pub use persist::*;
pub use simulator::*;
