//! # Error Types
//!
//! Errors raised while parsing shared primitives.

use thiserror::Error;

/// Errors that can occur when parsing an [`Address`](crate::Address).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Input was not valid hexadecimal.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded input had the wrong number of bytes.
    #[error("Invalid address length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
