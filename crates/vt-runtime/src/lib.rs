//! # VeriTrust Runtime Library
//!
//! Host-side harness for the product registry. The main entry point is the
//! `main.rs` binary; the modules are exposed for testing.
//!
//! - `config/` - layered [`RuntimeConfig`] (defaults, JSON file, `VT_*` env)
//! - `executor/` - [`BlockExecutor`] applying call batches block by block

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod executor;

pub use config::{ConfigError, ConfigSources, RuntimeConfig};
pub use executor::{load_script, parse_script, BlockExecutor, BlockReceipt, Script, Transaction};

use vt_product_registry::adapters::TracingEventSink;
use vt_product_registry::service::RegistryService;

/// Build an executor for `config`, logging registry events through `tracing`.
pub fn build_executor(
    config: &RuntimeConfig,
) -> Result<BlockExecutor<TracingEventSink>, ConfigError> {
    config.validate()?;
    let registry =
        RegistryService::new(config.owner, config.registry.clone(), TracingEventSink::new())?;
    Ok(BlockExecutor::new(registry, config.start_height))
}
