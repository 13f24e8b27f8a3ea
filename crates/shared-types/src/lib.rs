//! # Shared Types Crate
//!
//! Identity primitives shared by every VeriTrust crate.
//!
//! ## Design Principles
//!
//! - **Host-Authenticated Identity**: An [`Address`] arriving in a
//!   [`CallContext`] has already been authenticated by the host. Nothing in
//!   this workspace re-checks signatures.
//! - **Single Source of Truth**: The registry core and the runtime harness
//!   both use these types; neither defines its own address representation.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
