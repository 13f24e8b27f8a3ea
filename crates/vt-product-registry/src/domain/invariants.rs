//! # Domain Invariants
//!
//! Provenance invariants that hold for every registered product after every
//! committed call.
//!
//! - **INVARIANT-1**: History is never empty and entry 0 is the manufacturer.
//! - **INVARIANT-2**: The last history entry is the current owner.
//! - **INVARIANT-3**: Transfer indices are `0..len`, with no gaps.
//! - **INVARIANT-4**: The SHA-256 chain recomputes to the stored hashes.

use super::entities::{HistoryEntry, Product};
use super::ledger::first_broken_link;
use shared_types::Address;
use std::fmt;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: History starts with the registering manufacturer.
#[must_use]
pub fn check_genesis_invariant(product: &Product, history: &[HistoryEntry]) -> bool {
    history
        .first()
        .is_some_and(|first| first.owner == product.manufacturer)
}

/// INVARIANT-2: `history.last == current_owner`.
#[must_use]
pub fn check_current_owner_invariant(product: &Product, history: &[HistoryEntry]) -> bool {
    history
        .last()
        .is_some_and(|last| last.owner == product.current_owner)
}

/// INVARIANT-3: Entry `i` carries transfer index `i`.
#[must_use]
pub fn check_index_invariant(history: &[HistoryEntry]) -> bool {
    history
        .iter()
        .enumerate()
        .all(|(i, entry)| entry.transfer_index == i as u64)
}

/// Check every invariant for one product.
#[must_use]
pub fn check_all_invariants(product: &Product, history: &[HistoryEntry]) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_genesis_invariant(product, history) {
        violations.push(InvariantViolation::GenesisNotManufacturer {
            expected: product.manufacturer,
            found: history.first().map(|e| e.owner),
        });
    }

    if !check_current_owner_invariant(product, history) {
        violations.push(InvariantViolation::LastNotCurrentOwner {
            expected: product.current_owner,
            found: history.last().map(|e| e.owner),
        });
    }

    if !check_index_invariant(history) {
        violations.push(InvariantViolation::IndexGap);
    }

    // INVARIANT-4
    if let Some(index) = first_broken_link(product.id.as_str(), history) {
        violations.push(InvariantViolation::BrokenHashChain { index });
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Entry 0 is missing or not the manufacturer.
    GenesisNotManufacturer {
        expected: Address,
        found: Option<Address>,
    },
    /// Last entry is missing or not the current owner.
    LastNotCurrentOwner {
        expected: Address,
        found: Option<Address>,
    },
    /// Transfer indices are not contiguous from zero.
    IndexGap,
    /// Stored hash at `index` does not match the recomputed chain.
    BrokenHashChain { index: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenesisNotManufacturer { expected, found } => {
                write!(f, "history entry 0 is {found:?}, expected manufacturer {expected}")
            }
            Self::LastNotCurrentOwner { expected, found } => {
                write!(f, "last history entry is {found:?}, expected current owner {expected}")
            }
            Self::IndexGap => write!(f, "transfer indices are not contiguous"),
            Self::BrokenHashChain { index } => {
                write!(f, "hash chain broken at entry {index}")
            }
        }
    }
}
