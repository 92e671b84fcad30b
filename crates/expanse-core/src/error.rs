//! Error types for Expanse

use thiserror::Error;

/// Core Expanse errors
#[derive(Error, Debug)]
pub enum ExpanseError {
    // Configuration errors
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    // History errors
    #[error("Non-monotonic sample: last recorded time {last}, attempted {attempted}")]
    NonMonotonicSample { last: f64, attempted: f64 },

    // Snapshot errors
    #[error("Snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExpanseError {
    /// Shorthand for a rejected configuration value
    pub fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        ExpanseError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// Result type for Expanse operations
pub type ExpanseResult<T> = Result<T, ExpanseError>;
