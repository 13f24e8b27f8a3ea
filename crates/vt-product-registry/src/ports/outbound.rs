//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the registry calls out to.

use crate::events::RegistryEvent;

/// Receives events after each committed mutation.
///
/// Implementations must not block for long and must not fail the caller;
/// the registry has already committed by the time `publish` runs.
pub trait EventSink: Send + Sync {
    /// Deliver one event.
    fn publish(&self, event: &RegistryEvent);

    /// Total events accepted so far.
    fn events_published(&self) -> u64;
}
