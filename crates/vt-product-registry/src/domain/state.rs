//! # Registry State
//!
//! The three stores plus the two-phase mutation protocol:
//!
//! 1. `validate_*` inspects `&self` and either rejects the call or returns a
//!    [`Mutation`] describing exactly what will change.
//! 2. [`RegistryState::commit`] applies a mutation to every affected store.
//!
//! Validation never writes, so a rejected call leaves the state untouched.
//! Commit re-checks the preconditions it relies on before the first write.

use super::entities::{HistoryEntry, Product, ProductRecord, RegistryConfig};
use super::invariants::{check_all_invariants, InvariantCheckResult};
use super::ledger::OwnershipLedger;
use super::products::ProductRegistry;
use super::roles::RoleStore;
use super::value_objects::{Description, ProductId};
use crate::errors::RegistryError;
use crate::events::RegistryEvent;
use shared_types::{Address, CallContext};

/// A validated, not yet applied, state change.
///
/// Opaque outside the crate: the only way to obtain one is a `validate_*`
/// method, and [`RegistryState::commit`] re-checks it anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    kind: MutationKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MutationKind {
    AddManufacturer {
        candidate: Address,
        added_by: Address,
        block_height: u64,
    },
    RegisterProduct {
        product: Product,
    },
    TransferOwnership {
        product_id: ProductId,
        from: Address,
        to: Address,
        block_height: u64,
    },
}

impl Mutation {
    /// Wrap a product staged by [`RegistryState::stage_product`].
    pub(crate) fn register(product: Product) -> Self {
        Self {
            kind: MutationKind::RegisterProduct { product },
        }
    }

    /// Public name of the operation this mutation belongs to.
    #[must_use]
    pub fn operation(&self) -> &'static str {
        match self.kind {
            MutationKind::AddManufacturer { .. } => "add-manufacturer",
            MutationKind::RegisterProduct { .. } => "register-product",
            MutationKind::TransferOwnership { .. } => "transfer-ownership",
        }
    }
}

/// Complete registry state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryState {
    config: RegistryConfig,
    roles: RoleStore,
    products: ProductRegistry,
    ledger: OwnershipLedger,
}

impl RegistryState {
    /// Fresh state owned by `owner`.
    #[must_use]
    pub fn new(owner: Address, config: RegistryConfig) -> Self {
        Self {
            config,
            roles: RoleStore::new(owner),
            products: ProductRegistry::new(),
            ledger: OwnershipLedger::new(),
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Identity & role store.
    #[must_use]
    pub fn roles(&self) -> &RoleStore {
        &self.roles
    }

    /// Product store.
    #[must_use]
    pub fn products(&self) -> &ProductRegistry {
        &self.products
    }

    /// Ownership ledger.
    #[must_use]
    pub fn ledger(&self) -> &OwnershipLedger {
        &self.ledger
    }

    // =========================================================================
    // VALIDATION (pure)
    // =========================================================================

    /// Validate `add-manufacturer`. `Ok(None)` means the candidate is
    /// already a manufacturer and nothing needs to change.
    pub fn validate_add_manufacturer(
        &self,
        ctx: &CallContext,
        candidate: Address,
    ) -> Result<Option<Mutation>, RegistryError> {
        self.roles.ensure_owner(&ctx.caller)?;
        if self.roles.is_manufacturer(&candidate) {
            return Ok(None);
        }
        Ok(Some(Mutation {
            kind: MutationKind::AddManufacturer {
                candidate,
                added_by: ctx.caller,
                block_height: ctx.block_height,
            },
        }))
    }

    /// Validate `register-product`.
    ///
    /// Check order: manufacturer role, id bounds, description bounds,
    /// uniqueness.
    pub fn validate_register(
        &self,
        ctx: &CallContext,
        product_id: &str,
        description: &str,
    ) -> Result<Mutation, RegistryError> {
        self.stage_product(ctx, product_id, description)
            .map(Mutation::register)
    }

    /// The product a valid `register-product` call would create.
    pub(crate) fn stage_product(
        &self,
        ctx: &CallContext,
        product_id: &str,
        description: &str,
    ) -> Result<Product, RegistryError> {
        self.roles.ensure_manufacturer(&ctx.caller)?;
        let id = ProductId::parse(product_id, self.config.max_product_id_len)?;
        let description = Description::parse(description, self.config.max_description_len)?;
        if self.products.contains(id.as_str()) {
            return Err(RegistryError::ProductExists {
                product_id: id.to_string(),
            });
        }
        Ok(Product {
            id,
            description,
            manufacturer: ctx.caller,
            current_owner: ctx.caller,
            registered_at: ctx.block_height,
        })
    }

    /// Validate `transfer-ownership`.
    pub fn validate_transfer(
        &self,
        ctx: &CallContext,
        product_id: &str,
        new_owner: Address,
    ) -> Result<Mutation, RegistryError> {
        let product = self.products.get(product_id)?;
        if product.current_owner != ctx.caller {
            return Err(RegistryError::NotCurrentOwner {
                caller: ctx.caller,
                product_id: product_id.to_string(),
            });
        }
        Ok(Mutation {
            kind: MutationKind::TransferOwnership {
                product_id: product.id.clone(),
                from: ctx.caller,
                to: new_owner,
                block_height: ctx.block_height,
            },
        })
    }

    // =========================================================================
    // COMMIT
    // =========================================================================

    /// Apply a validated mutation.
    ///
    /// Every precondition the mutation was validated against is checked
    /// again here, before the first write.
    pub fn commit(&mut self, mutation: Mutation) -> Result<RegistryEvent, RegistryError> {
        match mutation.kind {
            MutationKind::AddManufacturer {
                candidate,
                added_by,
                block_height,
            } => {
                self.roles.ensure_owner(&added_by)?;
                self.roles.insert(candidate);
                Ok(RegistryEvent::ManufacturerAdded {
                    manufacturer: candidate,
                    added_by,
                    block_height,
                })
            }
            MutationKind::RegisterProduct { product } => {
                self.roles.ensure_manufacturer(&product.manufacturer)?;
                if product.current_owner != product.manufacturer {
                    return Err(RegistryError::NotCurrentOwner {
                        caller: product.current_owner,
                        product_id: product.id.to_string(),
                    });
                }
                let id = product.id.clone();
                if self.products.contains(id.as_str()) || self.ledger.len_of(id.as_str()) > 0 {
                    return Err(RegistryError::ProductExists {
                        product_id: id.to_string(),
                    });
                }
                let manufacturer = product.manufacturer;
                let block_height = product.registered_at;
                let entry = self.ledger.open(id.clone(), manufacturer, block_height)?;
                self.products.insert(product)?;
                Ok(RegistryEvent::ProductRegistered {
                    product_id: id,
                    manufacturer,
                    entry_hash: entry.entry_hash,
                    block_height,
                })
            }
            MutationKind::TransferOwnership {
                product_id,
                from,
                to,
                block_height,
            } => {
                let product = self.products.get_mut(product_id.as_str())?;
                if product.current_owner != from {
                    return Err(RegistryError::NotCurrentOwner {
                        caller: from,
                        product_id: product_id.to_string(),
                    });
                }
                let entry = self.ledger.append(product_id.as_str(), to, block_height)?;
                product.current_owner = to;
                Ok(RegistryEvent::OwnershipTransferred {
                    product_id,
                    from,
                    to,
                    transfer_index: entry.transfer_index,
                    entry_hash: entry.entry_hash,
                    block_height,
                })
            }
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Record view used by `verify-product`.
    pub fn record(&self, product_id: &str) -> Result<ProductRecord, RegistryError> {
        let product = self.products.get(product_id)?;
        Ok(ProductRecord::from_product(
            product,
            self.ledger.len_of(product_id),
        ))
    }

    /// Ordered ownership history.
    pub fn history(&self, product_id: &str) -> Result<&[HistoryEntry], RegistryError> {
        // Existence is decided by the product store.
        self.products.get(product_id)?;
        self.ledger.history(product_id)
    }

    /// Current owner.
    pub fn current_owner_of(&self, product_id: &str) -> Result<Address, RegistryError> {
        self.products.current_owner_of(product_id)
    }

    /// Run every provenance invariant for one product.
    pub fn check_invariants(&self, product_id: &str) -> Result<InvariantCheckResult, RegistryError> {
        let product = self.products.get(product_id)?;
        let history = self.ledger.history(product_id).unwrap_or(&[]);
        Ok(check_all_invariants(product, history))
    }
}
