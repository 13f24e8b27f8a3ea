//! # Value Objects
//!
//! Bounded ASCII text types for product identifiers and descriptions.
//! Both are validated once at construction and immutable afterwards.

use crate::errors::RegistryError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Printable ASCII: space (0x20) through tilde (0x7E).
fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

// =============================================================================
// PRODUCT ID
// =============================================================================

/// Unique textual product identifier.
///
/// Non-empty printable ASCII, at most `max_len` bytes.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Validate `raw` against the configured bound.
    pub fn parse(raw: &str, max_len: usize) -> Result<Self, RegistryError> {
        if raw.is_empty() {
            return Err(RegistryError::InvalidProductId {
                reason: "empty".to_string(),
            });
        }
        if raw.len() > max_len {
            return Err(RegistryError::InvalidProductId {
                reason: format!("length {} exceeds {max_len}", raw.len()),
            });
        }
        if !is_printable_ascii(raw) {
            return Err(RegistryError::InvalidProductId {
                reason: "not printable ASCII".to_string(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProductId({:?})", self.0)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// DESCRIPTION
// =============================================================================

/// Free-text product description. Printable ASCII, possibly empty.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Validate `raw` against the configured bound.
    pub fn parse(raw: &str, max_len: usize) -> Result<Self, RegistryError> {
        if raw.len() > max_len {
            return Err(RegistryError::InvalidDescription {
                reason: format!("length {} exceeds {max_len}", raw.len()),
            });
        }
        if !is_printable_ascii(raw) {
            return Err(RegistryError::InvalidDescription {
                reason: "not printable ASCII".to_string(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    /// The description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Description({:?})", self.0)
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
