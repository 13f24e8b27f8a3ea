//! # Identity & Role Store
//!
//! The registry owner, fixed at construction, and the manufacturer set.
//! There is no removal path and no way to hand the owner role to someone else.

use crate::errors::RegistryError;
use shared_types::Address;
use std::collections::BTreeSet;

/// Owner singleton plus the set of authorized manufacturers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleStore {
    owner: Address,
    manufacturers: BTreeSet<Address>,
}

impl RoleStore {
    /// Create a store owned by `owner` with an empty manufacturer set.
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            manufacturers: BTreeSet::new(),
        }
    }

    /// The owner identity.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// True if `identity` is the owner.
    #[must_use]
    pub fn is_owner(&self, identity: &Address) -> bool {
        self.owner == *identity
    }

    /// True if `identity` may register products.
    #[must_use]
    pub fn is_manufacturer(&self, identity: &Address) -> bool {
        self.manufacturers.contains(identity)
    }

    /// All manufacturers in ascending address order.
    #[must_use]
    pub fn manufacturers(&self) -> Vec<Address> {
        self.manufacturers.iter().copied().collect()
    }

    /// Number of manufacturers.
    #[must_use]
    pub fn manufacturer_count(&self) -> usize {
        self.manufacturers.len()
    }

    /// Owner-gate check shared by every owner-only action.
    pub fn ensure_owner(&self, caller: &Address) -> Result<(), RegistryError> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(RegistryError::NotOwner { caller: *caller })
        }
    }

    /// Manufacturer-gate check used by registration.
    pub fn ensure_manufacturer(&self, caller: &Address) -> Result<(), RegistryError> {
        if self.is_manufacturer(caller) {
            Ok(())
        } else {
            Err(RegistryError::NotManufacturer { caller: *caller })
        }
    }

    /// Insert without authorization. Returns false if already present.
    pub(crate) fn insert(&mut self, candidate: Address) -> bool {
        self.manufacturers.insert(candidate)
    }
}
