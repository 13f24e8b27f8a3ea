//! # Error Types
//!
//! All error types for the product registry.
//!
//! ## Stable Error Codes
//!
//! External callers branch on the numeric code, so these values never change
//! between versions. New variants take the next free number.
//!
//! | Error | Code |
//! |-------|------|
//! | `NotOwner` | 100 |
//! | `NotManufacturer` | 101 |
//! | `ProductExists` | 102 |
//! | `ProductNotFound` | 103 |
//! | `NotCurrentOwner` | 104 |
//! | `InvalidProductId` | 105 |
//! | `InvalidDescription` | 106 |

use shared_types::Address;
use thiserror::Error;

// =============================================================================
// ERROR CODES
// =============================================================================

/// Stable numeric error codes.
pub mod codes {
    /// Caller is not the registry owner.
    pub const NOT_OWNER: u32 = 100;
    /// Caller is not an authorized manufacturer.
    pub const NOT_MANUFACTURER: u32 = 101;
    /// Product identifier is already registered.
    pub const PRODUCT_EXISTS: u32 = 102;
    /// Product identifier is unknown.
    pub const PRODUCT_NOT_FOUND: u32 = 103;
    /// Caller does not currently own the product.
    pub const NOT_CURRENT_OWNER: u32 = 104;
    /// Product identifier violates the length or charset bounds.
    pub const INVALID_PRODUCT_ID: u32 = 105;
    /// Description violates the length or charset bounds.
    pub const INVALID_DESCRIPTION: u32 = 106;
}

// =============================================================================
// REGISTRY ERRORS
// =============================================================================

/// Errors returned by registry operations.
///
/// Every variant is raised during validation, before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Owner-only action attempted by someone else.
    #[error("caller {caller} is not the registry owner")]
    NotOwner { caller: Address },

    /// Registration attempted by a non-manufacturer.
    #[error("caller {caller} is not an authorized manufacturer")]
    NotManufacturer { caller: Address },

    /// Registration attempted for an identifier already present.
    #[error("product already registered: {product_id}")]
    ProductExists { product_id: String },

    /// Operation referenced an unknown product identifier.
    #[error("product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// Transfer attempted by someone other than the current owner.
    #[error("caller {caller} is not the current owner of {product_id}")]
    NotCurrentOwner { caller: Address, product_id: String },

    /// Product identifier is empty, too long, or not printable ASCII.
    #[error("invalid product id: {reason}")]
    InvalidProductId { reason: String },

    /// Description is too long or not printable ASCII.
    #[error("invalid description: {reason}")]
    InvalidDescription { reason: String },
}

impl RegistryError {
    /// The stable numeric code for this error.
    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            Self::NotOwner { .. } => codes::NOT_OWNER,
            Self::NotManufacturer { .. } => codes::NOT_MANUFACTURER,
            Self::ProductExists { .. } => codes::PRODUCT_EXISTS,
            Self::ProductNotFound { .. } => codes::PRODUCT_NOT_FOUND,
            Self::NotCurrentOwner { .. } => codes::NOT_CURRENT_OWNER,
            Self::InvalidProductId { .. } => codes::INVALID_PRODUCT_ID,
            Self::InvalidDescription { .. } => codes::INVALID_DESCRIPTION,
        }
    }

    /// Short symbolic name for a code, as used in logs and receipts.
    #[must_use]
    pub fn name_for_code(code: u32) -> Option<&'static str> {
        match code {
            codes::NOT_OWNER => Some("ERR_NOT_OWNER"),
            codes::NOT_MANUFACTURER => Some("ERR_NOT_MANUFACTURER"),
            codes::PRODUCT_EXISTS => Some("ERR_PRODUCT_EXISTS"),
            codes::PRODUCT_NOT_FOUND => Some("ERR_PRODUCT_NOT_FOUND"),
            codes::NOT_CURRENT_OWNER => Some("ERR_NOT_CURRENT_OWNER"),
            codes::INVALID_PRODUCT_ID => Some("ERR_INVALID_PRODUCT_ID"),
            codes::INVALID_DESCRIPTION => Some("ERR_INVALID_DESCRIPTION"),
            _ => None,
        }
    }

    /// Symbolic name of this error.
    #[must_use]
    pub fn name(&self) -> &'static str {
        // Every variant has a code in the table above.
        Self::name_for_code(self.code()).unwrap_or("ERR_UNKNOWN")
    }

    /// Shorthand for a not-found error.
    pub(crate) fn not_found(product_id: &str) -> Self {
        Self::ProductNotFound {
            product_id: product_id.to_string(),
        }
    }
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

/// Errors from validating a [`RegistryConfig`](crate::domain::RegistryConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A length bound was set to zero.
    #[error("{field} must be greater than zero")]
    ZeroLimit { field: &'static str },

    /// A length bound exceeds the hard ceiling.
    #[error("{field} = {value} exceeds the maximum of {max}")]
    LimitTooLarge {
        field: &'static str,
        value: usize,
        max: usize,
    },
}

// =============================================================================
// TESTS
// =============================================================================
