//! # Registry Service
//!
//! The façade every host call goes through. Wraps [`RegistryState`] in a
//! single lock and drives the validate-then-commit protocol.
//!
//! ## Concurrency
//!
//! - Mutating calls hold the write lock across validation and commit, so
//!   calls are applied one at a time and never interleave.
//! - Queries take the read lock and only ever observe committed state.
//! - Events are published before the write lock is released, so sinks
//!   observe them in commit order. Sinks must therefore return quickly.

use crate::adapters::InMemoryEventSink;
use crate::domain::{
    HistoryEntry, InvariantCheckResult, Mutation, ProductRecord, RegistryConfig, RegistryState,
};
use crate::errors::{ConfigError, RegistryError};
use crate::events::RegistryEvent;
use crate::ports::inbound::ProductRegistryApi;
use crate::ports::outbound::EventSink;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use shared_types::{Address, CallContext};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Counters for the registry service.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStats {
    /// Mutating calls that succeeded (including no-op re-adds).
    pub calls_committed: u64,
    /// Read-only calls that succeeded.
    pub queries_served: u64,
    /// Calls of any kind that failed.
    pub calls_rejected: u64,
    /// Failures grouped by stable error code.
    pub rejections_by_code: BTreeMap<u32, u64>,
}

impl ServiceStats {
    fn record_rejection(&mut self, err: &RegistryError) {
        self.calls_rejected += 1;
        *self.rejections_by_code.entry(err.code()).or_insert(0) += 1;
    }
}

/// The product registry service.
pub struct RegistryService<E: EventSink> {
    /// All registry state behind one lock.
    state: RwLock<RegistryState>,
    /// Outbound event port.
    events: Arc<E>,
    /// Service statistics.
    stats: Mutex<ServiceStats>,
}

impl<E: EventSink> RegistryService<E> {
    /// Create a service owned by `owner`.
    pub fn new(owner: Address, config: RegistryConfig, events: E) -> Result<Self, ConfigError> {
        Self::with_shared_sink(owner, config, Arc::new(events))
    }

    /// Create a service publishing to a sink the caller keeps a handle to.
    pub fn with_shared_sink(
        owner: Address,
        config: RegistryConfig,
        events: Arc<E>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(owner = %owner, ?config, "Product registry initialized");
        Ok(Self {
            state: RwLock::new(RegistryState::new(owner, config)),
            events,
            stats: Mutex::new(ServiceStats::default()),
        })
    }

    /// The registry owner.
    pub fn owner(&self) -> Address {
        self.state.read().roles().owner()
    }

    /// Manufacturers in ascending address order.
    pub fn manufacturers(&self) -> Vec<Address> {
        self.state.read().roles().manufacturers()
    }

    /// Number of registered products.
    pub fn product_count(&self) -> usize {
        self.state.read().products().len()
    }

    /// Active configuration.
    pub fn config(&self) -> RegistryConfig {
        self.state.read().config().clone()
    }

    /// Current service statistics.
    pub fn stats(&self) -> ServiceStats {
        self.stats.lock().clone()
    }

    /// The outbound event sink.
    pub fn event_sink(&self) -> &Arc<E> {
        &self.events
    }

    /// Copy of the full committed state.
    pub fn snapshot(&self) -> RegistryState {
        self.state.read().clone()
    }

    /// Recompute the provenance hash chain and ownership invariants of one
    /// product.
    #[instrument(skip(self))]
    pub fn verify_history_integrity(
        &self,
        product_id: &str,
    ) -> Result<InvariantCheckResult, RegistryError> {
        let result = self.query(|state| state.check_invariants(product_id));
        if let Ok(InvariantCheckResult::Invalid(violations)) = &result {
            warn!(product_id, ?violations, "Provenance invariant violated");
        }
        result
    }

    /// Run a read-only call and count its outcome.
    fn query<T>(
        &self,
        read: impl FnOnce(&RegistryState) -> Result<T, RegistryError>,
    ) -> Result<T, RegistryError> {
        let result = read(&*self.state.read());
        let mut stats = self.stats.lock();
        match &result {
            Ok(_) => stats.queries_served += 1,
            Err(e) => {
                debug!(code = e.code(), error = %e, "Query failed");
                stats.record_rejection(e);
            }
        }
        result
    }

    /// Validate and commit one mutating call under the write lock.
    ///
    /// `validate` returns the mutation to commit (`None` means the call
    /// succeeds without changing anything) together with the call's result,
    /// which is fixed before the commit runs. Events are published while
    /// the lock is still held, so sinks see them in commit order.
    fn apply<T>(
        &self,
        operation: &'static str,
        validate: impl FnOnce(&RegistryState) -> Result<(Option<Mutation>, T), RegistryError>,
    ) -> Result<(Option<RegistryEvent>, T), RegistryError> {
        let mut state = self.state.write();
        let outcome = validate(&*state).and_then(|(mutation, output)| {
            let event = mutation.map(|m| state.commit(m)).transpose()?;
            Ok((event, output))
        });

        match &outcome {
            Ok((event, _)) => {
                self.stats.lock().calls_committed += 1;
                match event {
                    Some(event) => {
                        info!(operation, topic = event.topic(), "Call committed");
                        if state.config().emit_events {
                            self.events.publish(event);
                        }
                    }
                    None => debug!(operation, "Call committed without state change"),
                }
            }
            Err(e) => {
                warn!(operation, code = e.code(), error = %e, "Call rejected");
                self.stats.lock().record_rejection(e);
            }
        }
        outcome
    }
}

/// Create a service with an in-memory event sink (for testing).
#[must_use]
pub fn create_test_service(owner: Address) -> RegistryService<InMemoryEventSink> {
    RegistryService::new(owner, RegistryConfig::default(), InMemoryEventSink::new())
        .unwrap_or_else(|_| unreachable!("default registry config is valid"))
}

// =============================================================================
// ProductRegistryApi Implementation
// =============================================================================

impl<E: EventSink> ProductRegistryApi for RegistryService<E> {
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller, height = ctx.block_height))]
    fn add_manufacturer(
        &self,
        ctx: &CallContext,
        candidate: Address,
    ) -> Result<bool, RegistryError> {
        let (event, ()) = self.apply("add-manufacturer", |state| {
            state
                .validate_add_manufacturer(ctx, candidate)
                .map(|m| (m, ()))
        })?;
        Ok(event.is_some())
    }

    #[instrument(skip(self, ctx, description), fields(caller = %ctx.caller, height = ctx.block_height))]
    fn register_product(
        &self,
        ctx: &CallContext,
        product_id: &str,
        description: &str,
    ) -> Result<ProductRecord, RegistryError> {
        let (_, record) = self.apply("register-product", |state| {
            let product = state.stage_product(ctx, product_id, description)?;
            let record = ProductRecord::from_product(&product, 1);
            Ok((Some(Mutation::register(product)), record))
        })?;
        Ok(record)
    }

    #[instrument(skip(self))]
    fn verify_product(&self, product_id: &str) -> Result<ProductRecord, RegistryError> {
        self.query(|state| state.record(product_id))
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller, height = ctx.block_height))]
    fn transfer_ownership(
        &self,
        ctx: &CallContext,
        product_id: &str,
        new_owner: Address,
    ) -> Result<(), RegistryError> {
        self.apply("transfer-ownership", |state| {
            state
                .validate_transfer(ctx, product_id, new_owner)
                .map(|m| (Some(m), ()))
        })?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn get_ownership_history(&self, product_id: &str) -> Result<Vec<HistoryEntry>, RegistryError> {
        self.query(|state| state.history(product_id).map(<[HistoryEntry]>::to_vec))
    }

    #[instrument(skip(self))]
    fn get_product_owner(&self, product_id: &str) -> Result<Address, RegistryError> {
        self.query(|state| state.current_owner_of(product_id))
    }

    fn is_manufacturer(&self, identity: &Address) -> bool {
        self.state.read().roles().is_manufacturer(identity)
    }
}

// =============================================================================
// TESTS
// =============================================================================
