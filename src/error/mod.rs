//! Error types for fixpool.

use std::fmt;

/// Errors that can occur when building a pool.
///
/// Exhaustion is not an error: [`Pool::get`](crate::Pool::get) reports it as
/// `None` so callers can apply backpressure or fall back to a fresh allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Invalid configuration parameter.
    InvalidConfiguration {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::InvalidConfiguration { message } => {
                write!(f, "invalid configuration: {}", message)
            }
        }
    }
}

impl std::error::Error for PoolError {}
