//! # Domain Entities
//!
//! Product records, provenance entries, and registry configuration.
//!
//! ## Immutability
//!
//! Every field of [`Product`] except `current_owner` is fixed at
//! registration. [`HistoryEntry`] values are never modified once appended.

use super::value_objects::{Description, ProductId};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Hard ceiling on either text bound.
pub const MAX_TEXT_LIMIT: usize = 4096;

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Maximum product identifier length in bytes.
    pub max_product_id_len: usize,
    /// Maximum description length in bytes.
    pub max_description_len: usize,
    /// Publish a [`RegistryEvent`](crate::events::RegistryEvent) after each commit.
    pub emit_events: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_product_id_len: 32,
            max_description_len: 256,
            emit_events: true,
        }
    }
}

impl RegistryConfig {
    /// Reject zero or oversized bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("max_product_id_len", self.max_product_id_len),
            ("max_description_len", self.max_description_len),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroLimit { field });
            }
            if value > MAX_TEXT_LIMIT {
                return Err(ConfigError::LimitTooLarge {
                    field,
                    value,
                    max: MAX_TEXT_LIMIT,
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// PRODUCT
// =============================================================================

/// A registered product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,
    /// Set at registration.
    pub description: Description,
    /// Identity that registered the product.
    pub manufacturer: Address,
    /// Mutated only by a successful transfer.
    pub current_owner: Address,
    /// Block height of the registering call.
    pub registered_at: u64,
}

// =============================================================================
// HISTORY ENTRY
// =============================================================================

/// One link in a product's ownership history.
///
/// `entry_hash` commits to the previous entry's hash, so rewriting any
/// earlier entry changes every later hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Owner from this point on.
    pub owner: Address,
    /// 0 for the registration entry, n for the n-th transfer.
    pub transfer_index: u64,
    /// Block height of the call that produced this entry.
    pub block_height: u64,
    /// SHA-256 chain hash.
    #[serde(with = "hex::serde")]
    pub entry_hash: Hash,
}

// =============================================================================
// PRODUCT RECORD (query view)
// =============================================================================

/// What `verify-product` reports for a registered product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Identifier that was looked up.
    pub product_id: ProductId,
    /// Description set at registration.
    pub description: Description,
    /// Registering manufacturer.
    pub manufacturer: Address,
    /// Current owner.
    pub current_owner: Address,
    /// Block height of registration.
    pub registered_at: u64,
    /// Number of successful transfers so far.
    pub transfer_count: u64,
}

impl ProductRecord {
    /// Build the view from a product and its history length.
    #[must_use]
    pub fn from_product(product: &Product, history_len: usize) -> Self {
        Self {
            product_id: product.id.clone(),
            description: product.description.clone(),
            manufacturer: product.manufacturer,
            current_owner: product.current_owner,
            registered_at: product.registered_at,
            transfer_count: history_len.saturating_sub(1) as u64,
        }
    }
}
