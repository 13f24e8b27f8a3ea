//! # VT Product Registry - Authenticity & Provenance Ledger
//!
//! ## Purpose
//!
//! Lets designated manufacturers register physical products, records every
//! change of custody, and lets any party verify a product's authenticity and
//! provenance. The host sequences calls and authenticates callers; this
//! crate is the state machine behind them.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Only the owner changes the manufacturer set | `domain/roles.rs` - `ensure_owner()` |
//! | INVARIANT-2 | Only manufacturers register; ids are never reused | `domain/state.rs` - `validate_register()` |
//! | INVARIANT-3 | Only the current owner transfers | `domain/state.rs` - `validate_transfer()` |
//! | INVARIANT-4 | `history.len == 1 + transfers`, `history.last == owner` | `domain/invariants.rs` |
//! | INVARIANT-5 | History is append-only and hash-chained | `domain/ledger.rs` |
//! | INVARIANT-6 | A failed call changes nothing | `service.rs` - `apply()` |
//!
//! ## Operations
//!
//! | Operation | Caller | Error codes |
//! |-----------|--------|-------------|
//! | `add-manufacturer` | owner | 100 |
//! | `register-product` | manufacturer | 101, 102, 105, 106 |
//! | `verify-product` | any | 103 |
//! | `transfer-ownership` | current owner | 103, 104 |
//! | `get-ownership-history` | any | 103 |
//! | `get-product-owner` | any | 103 |
//!
//! ## Usage Example
//!
//! ```
//! use vt_product_registry::prelude::*;
//!
//! let deployer = Address::repeat_byte(0xD0);
//! let maker = Address::repeat_byte(1);
//! let registry = create_test_service(deployer);
//!
//! registry.add_manufacturer(&CallContext::at_genesis(deployer), maker).unwrap();
//! registry
//!     .register_product(&CallContext::at_genesis(maker), "PROD123", "Authentic Product XYZ")
//!     .unwrap();
//!
//! assert_eq!(registry.get_product_owner("PROD123").unwrap(), maker);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Shared primitives
    pub use shared_types::{Address, CallContext, Hash};

    // Domain
    pub use crate::domain::{
        Description, HistoryEntry, InvariantCheckResult, InvariantViolation, Mutation, Product,
        ProductId, ProductRecord, RegistryConfig, RegistryState,
    };

    // Ports
    pub use crate::ports::{EventSink, ProductRegistryApi};

    // Adapters
    pub use crate::adapters::{InMemoryEventSink, NoopEventSink, TracingEventSink};

    // Events
    pub use crate::events::{topics, RegistryEvent};

    // Errors
    pub use crate::errors::{codes, ConfigError, RegistryError};

    // Dispatch
    pub use crate::dispatch::{dispatch, CallOutput, CallReceipt, ContractCall};

    // Service
    pub use crate::service::{create_test_service, RegistryService, ServiceStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Contract name the host deploys this registry under.
pub const CONTRACT_NAME: &str = "veritrust";
