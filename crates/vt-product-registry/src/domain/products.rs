//! # Product Registry
//!
//! Product identifier → product record. Records are never removed and an
//! identifier is never reused.

use super::entities::Product;
use super::value_objects::ProductId;
use crate::errors::RegistryError;
use shared_types::Address;
use std::collections::HashMap;

/// Store of registered products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductRegistry {
    products: HashMap<ProductId, Product>,
}

impl ProductRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.products.contains_key(id)
    }

    /// Lookup. A miss means the product is unregistered.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    /// Lookup, mapping a miss to `ProductNotFound`.
    pub fn get(&self, id: &str) -> Result<&Product, RegistryError> {
        self.lookup(id).ok_or_else(|| RegistryError::not_found(id))
    }

    /// Current owner of `id`.
    pub fn current_owner_of(&self, id: &str) -> Result<Address, RegistryError> {
        self.get(id).map(|p| p.current_owner)
    }

    /// Number of registered products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All registered identifiers, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<ProductId> {
        let mut ids: Vec<_> = self.products.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Insert a new record. Fails if the identifier is taken.
    pub(crate) fn insert(&mut self, product: Product) -> Result<(), RegistryError> {
        if self.products.contains_key(&product.id) {
            return Err(RegistryError::ProductExists {
                product_id: product.id.to_string(),
            });
        }
        self.products.insert(product.id.clone(), product);
        Ok(())
    }

    /// Mutable access for the transfer commit path.
    pub(crate) fn get_mut(&mut self, id: &str) -> Result<&mut Product, RegistryError> {
        self.products
            .get_mut(id)
            .ok_or_else(|| RegistryError::not_found(id))
    }
}
