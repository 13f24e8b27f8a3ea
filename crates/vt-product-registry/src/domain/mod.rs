//! # Domain Layer (Inner Hexagon)
//!
//! Pure registry logic: the three stores, the two-phase mutation protocol,
//! and the provenance invariants.
//! NO I/O, NO locking, NO logging.
//!
//! - Dependencies point INWARD only (the service and adapters depend on
//!   this module, never the reverse).

pub mod entities;
pub mod invariants;
pub mod ledger;
pub mod products;
pub mod roles;
pub mod state;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use ledger::*;
pub use products::*;
pub use roles::*;
pub use state::*;
pub use value_objects::*;
