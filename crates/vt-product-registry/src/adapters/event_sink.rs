//! # Event Sink Adapters
//!
//! - [`InMemoryEventSink`]: keeps every event, for tests and the replay CLI.
//! - [`TracingEventSink`]: writes each event to the `tracing` log.
//! - [`NoopEventSink`]: drops everything.

use crate::events::RegistryEvent;
use crate::ports::outbound::EventSink;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct InMemoryEventSink {
    events: RwLock<Vec<RegistryEvent>>,
}

impl InMemoryEventSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far.
    #[must_use]
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.events.read().clone()
    }

    /// Events with the given topic.
    #[must_use]
    pub fn events_with_topic(&self, topic: &str) -> Vec<RegistryEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.topic() == topic)
            .cloned()
            .collect()
    }

    /// Remove and return all collected events.
    pub fn drain(&self) -> Vec<RegistryEvent> {
        std::mem::take(&mut *self.events.write())
    }
}

impl EventSink for InMemoryEventSink {
    fn publish(&self, event: &RegistryEvent) {
        self.events.write().push(event.clone());
    }

    fn events_published(&self) -> u64 {
        self.events.read().len() as u64
    }
}

/// Logs every event at `info` level.
#[derive(Debug, Default)]
pub struct TracingEventSink {
    published: AtomicU64,
}

impl TracingEventSink {
    /// Create a new sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for TracingEventSink {
    fn publish(&self, event: &RegistryEvent) {
        self.published.fetch_add(1, Ordering::Relaxed);
        info!(
            topic = event.topic(),
            block_height = event.block_height(),
            event = ?event,
            "Registry event"
        );
    }

    fn events_published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}

/// Discards events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn publish(&self, _event: &RegistryEvent) {}

    fn events_published(&self) -> u64 {
        0
    }
}
