//! # Ownership History Ledger
//!
//! Per product, an append-only sequence of [`HistoryEntry`] values. Entry 0
//! is the registering manufacturer; every successful transfer appends one
//! entry for the new owner.
//!
//! ## Hash Chain
//!
//! ```text
//! entry_hash[i] = SHA-256( entry_hash[i-1]
//!                        || u32_be(len(id)) || id
//!                        || owner
//!                        || u64_be(transfer_index)
//!                        || u64_be(block_height) )
//! entry_hash[-1] = 0x00..00
//! ```

use super::entities::HistoryEntry;
use super::value_objects::ProductId;
use crate::errors::RegistryError;
use sha2::{Digest, Sha256};
use shared_types::{Address, Hash, ZERO_HASH};
use std::collections::HashMap;

/// Compute the chain hash for one entry.
#[must_use]
pub fn compute_entry_hash(
    previous: &Hash,
    product_id: &str,
    owner: &Address,
    transfer_index: u64,
    block_height: u64,
) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(previous);
    hasher.update((product_id.len() as u32).to_be_bytes());
    hasher.update(product_id.as_bytes());
    hasher.update(owner.as_bytes());
    hasher.update(transfer_index.to_be_bytes());
    hasher.update(block_height.to_be_bytes());
    hasher.finalize().into()
}

/// Build the entry that would follow `previous` in the chain.
fn next_entry(
    previous: Option<&HistoryEntry>,
    product_id: &str,
    owner: Address,
    block_height: u64,
) -> HistoryEntry {
    let (prev_hash, transfer_index) = match previous {
        Some(last) => (last.entry_hash, last.transfer_index + 1),
        None => (ZERO_HASH, 0),
    };
    HistoryEntry {
        owner,
        transfer_index,
        block_height,
        entry_hash: compute_entry_hash(&prev_hash, product_id, &owner, transfer_index, block_height),
    }
}

/// Per-product ownership histories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnershipLedger {
    histories: HashMap<ProductId, Vec<HistoryEntry>>,
}

impl OwnershipLedger {
    /// Empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Full ordered history of `id`.
    pub fn history(&self, id: &str) -> Result<&[HistoryEntry], RegistryError> {
        self.histories
            .get(id)
            .map(Vec::as_slice)
            .ok_or_else(|| RegistryError::not_found(id))
    }

    /// Most recent entry of `id`, if the product exists.
    #[must_use]
    pub fn last(&self, id: &str) -> Option<&HistoryEntry> {
        self.histories.get(id).and_then(|h| h.last())
    }

    /// Number of entries recorded for `id` (0 if unknown).
    #[must_use]
    pub fn len_of(&self, id: &str) -> usize {
        self.histories.get(id).map_or(0, Vec::len)
    }

    /// Iterate over every product's history.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, &[HistoryEntry])> {
        self.histories.iter().map(|(id, h)| (id, h.as_slice()))
    }

    /// Start a history with the registering manufacturer as entry 0.
    pub(crate) fn open(
        &mut self,
        id: ProductId,
        manufacturer: Address,
        block_height: u64,
    ) -> Result<HistoryEntry, RegistryError> {
        if self.histories.contains_key(&id) {
            return Err(RegistryError::ProductExists {
                product_id: id.to_string(),
            });
        }
        let entry = next_entry(None, id.as_str(), manufacturer, block_height);
        self.histories.insert(id, vec![entry.clone()]);
        Ok(entry)
    }

    /// Append `new_owner` to the history of `id`.
    ///
    /// The service only calls this after validating that `id` exists.
    pub(crate) fn append(
        &mut self,
        id: &str,
        new_owner: Address,
        block_height: u64,
    ) -> Result<HistoryEntry, RegistryError> {
        let history = self
            .histories
            .get_mut(id)
            .ok_or_else(|| RegistryError::not_found(id))?;
        let entry = next_entry(history.last(), id, new_owner, block_height);
        history.push(entry.clone());
        Ok(entry)
    }
}

/// Recompute the chain over `entries` and return the index of the first
/// entry whose stored hash or index does not match, if any.
#[must_use]
pub fn first_broken_link(product_id: &str, entries: &[HistoryEntry]) -> Option<usize> {
    let mut prev_hash = ZERO_HASH;
    for (i, entry) in entries.iter().enumerate() {
        let expected = compute_entry_hash(
            &prev_hash,
            product_id,
            &entry.owner,
            i as u64,
            entry.block_height,
        );
        if entry.transfer_index != i as u64 || entry.entry_hash != expected {
            return Some(i);
        }
        prev_hash = entry.entry_hash;
    }
    None
}
