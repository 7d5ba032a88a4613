//! Error types for Sawyer

use std::io;
use thiserror::Error;

/// Result type for Sawyer operations
pub type Result<T> = std::result::Result<T, SawyerError>;

/// Errors that can occur while encoding or decoding Sawyer data
#[derive(Debug, Error)]
pub enum SawyerError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Chunk header carries an encoding tag outside 0..=3
    #[error("Unknown chunk encoding: {0}")]
    UnknownEncoding(u8),

    /// Decoding would write past the caller's destination bound
    #[error("Destination capacity exceeded: {required} bytes required, capacity is {capacity}")]
    CapacityExceeded {
        /// Caller-supplied destination capacity
        capacity: usize,
        /// Bytes the decoder needed to write
        required: usize,
    },

    /// Input ended before the declared data
    #[error("Truncated input: needed {needed} bytes, {available} available")]
    Truncated {
        /// Bytes required
        needed: usize,
        /// Bytes present
        available: usize,
    },

    /// Back-reference points before the start of the decoded output
    #[error("Invalid back-reference: offset {offset} at output position {position}")]
    InvalidBackReference {
        /// Backward distance requested
        offset: usize,
        /// Output position the copy started at
        position: usize,
    },

    /// Malformed container
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl SawyerError {
    /// Whether this error is a destination capacity violation
    #[must_use]
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. })
    }
}
