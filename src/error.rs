//! Error types for the Floodgate gate.

use std::time::Duration;
use thiserror::Error;

/// Main error type for Floodgate operations.
#[derive(Error, Debug)]
pub enum FloodgateError {
    /// A limit's window was still at capacity after the single wait cycle
    #[error("Rate limit exceeded: {max_requests} requests per {window:?}")]
    RateLimitExceeded {
        /// Maximum requests allowed by the violated limit
        max_requests: u64,
        /// Sliding window of the violated limit
        window: Duration,
    },

    /// A limit was constructed with a non-positive count or window
    #[error("Invalid rate limit: {0}")]
    InvalidLimit(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Floodgate operations.
pub type Result<T> = std::result::Result<T, FloodgateError>;
