//! Cross-crate integration tests.

pub mod properties;
pub mod runtime;
pub mod scenarios;
