//! Error type for configuration-boundary validation
//!
//! The core itself is pure computation and cannot fail mid-tick; errors
//! only arise when a caller hands in a malformed configuration value. Each
//! rejected call leaves simulation state unchanged

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("pole count must be at least 1, got {0}")]
    InvalidPoleCount(u32),

    #[error("expected a 3-component vector, got {0} components")]
    InvalidVector(usize),

    #[error("stator references unknown magnet index {0}")]
    UnknownMagnet(usize),
}
