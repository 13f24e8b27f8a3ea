//! # Event Schema
//!
//! Events published after each committed registry mutation. Publication is
//! fire-and-forget: the call's result and the committed state never depend
//! on whether a sink accepted the event.
//!
//! | Event | Topic | Published after |
//! |-------|-------|-----------------|
//! | `ManufacturerAdded` | `MANUFAC` | add-manufacturer (new entry only) |
//! | `ProductRegistered` | `REGISTR` | register-product |
//! | `OwnershipTransferred` | `TRANSFR` | transfer-ownership |

use crate::domain::ProductId;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash};

/// Short event topics.
pub mod topics {
    /// Manufacturer set grew.
    pub const MANUFACTURER: &str = "MANUFAC";
    /// Product registered.
    pub const REGISTER: &str = "REGISTR";
    /// Ownership transferred.
    pub const TRANSFER: &str = "TRANSFR";
}

/// A committed state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RegistryEvent {
    /// A new manufacturer was authorized.
    ManufacturerAdded {
        /// Newly authorized identity.
        manufacturer: Address,
        /// The owner who authorized it.
        added_by: Address,
        /// Block height of the call.
        block_height: u64,
    },
    /// A product and its history were created.
    ProductRegistered {
        /// New product identifier.
        product_id: ProductId,
        /// Registering manufacturer and initial owner.
        manufacturer: Address,
        /// Hash of history entry 0.
        #[serde(with = "hex::serde")]
        entry_hash: Hash,
        /// Block height of the call.
        block_height: u64,
    },
    /// Ownership moved to a new identity.
    OwnershipTransferred {
        /// Product identifier.
        product_id: ProductId,
        /// Previous owner.
        from: Address,
        /// New owner.
        to: Address,
        /// Index of the appended history entry.
        transfer_index: u64,
        /// Hash of the appended history entry.
        #[serde(with = "hex::serde")]
        entry_hash: Hash,
        /// Block height of the call.
        block_height: u64,
    },
}

impl RegistryEvent {
    /// Topic for routing.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            Self::ManufacturerAdded { .. } => topics::MANUFACTURER,
            Self::ProductRegistered { .. } => topics::REGISTER,
            Self::OwnershipTransferred { .. } => topics::TRANSFER,
        }
    }

    /// Product the event concerns, if any.
    #[must_use]
    pub fn product_id(&self) -> Option<&ProductId> {
        match self {
            Self::ManufacturerAdded { .. } => None,
            Self::ProductRegistered { product_id, .. }
            | Self::OwnershipTransferred { product_id, .. } => Some(product_id),
        }
    }

    /// Block height of the call that produced the event.
    #[must_use]
    pub fn block_height(&self) -> u64 {
        match self {
            Self::ManufacturerAdded { block_height, .. }
            | Self::ProductRegistered { block_height, .. }
            | Self::OwnershipTransferred { block_height, .. } => *block_height,
        }
    }
}
