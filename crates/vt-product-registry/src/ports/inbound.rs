//! # Driving Ports (API - Inbound)
//!
//! The public operation surface of the registry. The host hands every call
//! an already-authenticated [`CallContext`].
//!
//! | Operation | Caller requirement | Failure codes |
//! |-----------|--------------------|---------------|
//! | `add_manufacturer` | owner | 100 |
//! | `register_product` | manufacturer | 101, 102, 105, 106 |
//! | `verify_product` | any | 103 |
//! | `transfer_ownership` | current owner | 103, 104 |
//! | `get_ownership_history` | any | 103 |
//! | `get_product_owner` | any | 103 |

use crate::domain::{HistoryEntry, ProductRecord};
use crate::errors::RegistryError;
use shared_types::{Address, CallContext};

/// Primary API for the product registry.
///
/// Every method is one atomic unit: it either commits completely or
/// returns an error with the state unchanged.
pub trait ProductRegistryApi: Send + Sync {
    /// Authorize `candidate` to register products.
    ///
    /// Returns `true` if the candidate was newly added, `false` if it was
    /// already a manufacturer.
    fn add_manufacturer(&self, ctx: &CallContext, candidate: Address)
        -> Result<bool, RegistryError>;

    /// Register a product owned by the calling manufacturer.
    fn register_product(
        &self,
        ctx: &CallContext,
        product_id: &str,
        description: &str,
    ) -> Result<ProductRecord, RegistryError>;

    /// Authenticity check: the product's record if it is registered.
    fn verify_product(&self, product_id: &str) -> Result<ProductRecord, RegistryError>;

    /// Hand the product to `new_owner`. Only the current owner may call this.
    fn transfer_ownership(
        &self,
        ctx: &CallContext,
        product_id: &str,
        new_owner: Address,
    ) -> Result<(), RegistryError>;

    /// Every owner the product has had, oldest first.
    fn get_ownership_history(&self, product_id: &str) -> Result<Vec<HistoryEntry>, RegistryError>;

    /// The product's current owner.
    fn get_product_owner(&self, product_id: &str) -> Result<Address, RegistryError>;

    /// True if `identity` may register products.
    fn is_manufacturer(&self, identity: &Address) -> bool;
}
