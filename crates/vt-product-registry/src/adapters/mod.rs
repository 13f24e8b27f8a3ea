//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the outbound ports.

pub mod event_sink;

pub use event_sink::*;
