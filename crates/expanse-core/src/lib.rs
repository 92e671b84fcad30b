//! Expanse Core - Fundamental types and primitives
//!
//! This crate defines the core types used throughout the simulator:
//! - Positions in the 2D world plane (Position2D)
//! - History-aware scalars (TimeSeries)
//! - Snapshot records exported to the persistence layer
//! - Error types

pub mod error;
pub mod position;
pub mod series;
pub mod snapshot;

pub use error::*;
pub use position::*;
pub use series::*;
pub use snapshot::*;
