//! Event Bus implementation.
//!
//! Provides the core EventBus struct and the process-wide instance used
//! for application-wide event distribution.

use parking_lot::{Mutex, RwLock};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use super::config::EventBusConfig;
use super::events::{Event, EventKind, EventPayload};
use super::handler::Handler;
use super::registry::SubscriberRegistry;
use crate::error::{EventBusError, HandlerError, HandlerResult, Result};

/// Outcome of a single `publish` call
///
/// Informational only; handler failures are already logged by the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    /// Kind of the published event
    pub kind: EventKind,
    /// Handlers that completed normally
    pub delivered: usize,
    /// Handlers that returned an error or panicked
    pub failed: usize,
}

impl DispatchReport {
    /// Number of handlers in the dispatch snapshot
    pub fn invoked(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Central event bus for application-wide event distribution
///
/// Handlers run synchronously on the publishing thread, in registration
/// order, against a snapshot of the subscriber list taken when `publish`
/// starts. A handler may subscribe, unsubscribe or publish from inside its
/// own invocation.
pub struct EventBus {
    registry: SubscriberRegistry,
    config: EventBusConfig,
}

impl EventBus {
    /// Create a new event bus with default configuration
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a new event bus with custom configuration
    pub fn with_config(config: EventBusConfig) -> Self {
        Self {
            registry: SubscriberRegistry::new(),
            config,
        }
    }

    /// Get the shared bus, creating it on first use
    pub fn instance() -> Arc<EventBus> {
        if let Some(bus) = INSTANCE.read().as_ref() {
            return Arc::clone(bus);
        }

        let _init = INIT_LOCK.lock();
        let mut slot = INSTANCE.write();
        // Another thread may have won the race while we waited.
        if let Some(bus) = slot.as_ref() {
            return Arc::clone(bus);
        }
        let bus = Arc::new(EventBus::new());
        *slot = Some(Arc::clone(&bus));
        tracing::info!("Event bus created");
        bus
    }

    /// Drop the shared bus so the next `instance()` builds a fresh one
    ///
    /// For tests only. Buses already handed out keep working but are no
    /// longer reachable through `instance()`.
    pub fn reset() {
        let _init = INIT_LOCK.lock();
        if INSTANCE.write().take().is_some() {
            tracing::info!("Event bus reset");
        }
    }

    /// Register `handler` for events of `kind`
    pub fn subscribe(&self, kind: EventKind, handler: Handler) {
        tracing::debug!("Handler {} subscribed to {}", handler, kind);
        self.registry.subscribe(kind, handler);
    }

    /// Wrap `callback` in a [`Handler`], register it and return the handle
    pub fn subscribe_fn<F>(
        &self,
        kind: EventKind,
        name: impl Into<String>,
        callback: F,
    ) -> Handler
    where
        F: Fn(&Event) -> HandlerResult + Send + Sync + 'static,
    {
        let handler = Handler::new(name, callback);
        self.subscribe(kind, handler.clone());
        handler
    }

    /// Register a callback for one payload type and return the handle
    pub fn subscribe_typed<E, F>(&self, name: impl Into<String>, callback: F) -> Handler
    where
        E: EventPayload,
        F: Fn(&E) -> HandlerResult + Send + Sync + 'static,
    {
        let handler = Handler::typed::<E, F>(name, callback);
        self.subscribe(E::KIND, handler.clone());
        handler
    }

    /// Remove one registration of `handler` for `kind`
    ///
    /// Returns true if the handler was found and removed. Unknown kinds and
    /// handlers are ignored.
    pub fn unsubscribe(&self, kind: EventKind, handler: &Handler) -> bool {
        let removed = self.registry.unsubscribe(kind, handler);
        if removed {
            tracing::debug!("Handler {} unsubscribed from {}", handler, kind);
        }
        removed
    }

    /// Deliver `event` to every handler registered for its kind
    ///
    /// Never fails. A handler that returns an error or panics is logged and
    /// skipped; the remaining handlers still run.
    pub fn publish(&self, event: impl Into<Event>) -> DispatchReport {
        let event = event.into();
        let kind = event.kind();
        let handlers = self.registry.snapshot(kind);

        let mut report = DispatchReport {
            kind,
            delivered: 0,
            failed: 0,
        };

        if handlers.is_empty() {
            if self.config.log_unhandled {
                tracing::debug!("No subscribers for {}", event.description());
            } else {
                tracing::trace!("No subscribers for {}", kind);
            }
            return report;
        }

        tracing::trace!("Dispatching {} to {} handlers", kind, handlers.len());

        for handler in &handlers {
            match self.invoke(handler, &event) {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    report.failed += 1;
                    tracing::warn!(
                        handler = %handler,
                        event = %kind,
                        error = %err,
                        "Event handler failed"
                    );
                }
            }
        }

        report
    }

    /// Number of registrations for `kind`
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.registry.len(kind)
    }

    /// Number of registrations across all kinds
    pub fn total_subscribers(&self) -> usize {
        self.registry.total()
    }

    /// Get the current configuration
    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }

    fn invoke(&self, handler: &Handler, event: &Event) -> std::result::Result<(), HandlerError> {
        let started = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.call(event)));

        if let Some(threshold) = self.config.slow_handler_threshold() {
            let elapsed = started.elapsed();
            if elapsed > threshold {
                tracing::warn!(
                    "Handler {} took {:?} on {} (threshold {:?})",
                    handler,
                    elapsed,
                    event.kind(),
                    threshold
                );
            }
        }

        match outcome {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(HandlerError::Failed(err)),
            Err(payload) => Err(HandlerError::from_panic(payload)),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}

/// Global event bus instance
static INSTANCE: RwLock<Option<Arc<EventBus>>> = parking_lot::const_rwlock(None);

/// Serializes creation and reset of the global instance
static INIT_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Get or initialize the global event bus
///
/// This is the primary way to access the event bus throughout the application.
pub fn event_bus() -> Arc<EventBus> {
    EventBus::instance()
}

/// Initialize the global event bus with custom configuration
///
/// Must be called before any calls to `event_bus()`. Returns an error if
/// the event bus has already been initialized or the config is invalid.
pub fn init_event_bus(config: EventBusConfig) -> Result<Arc<EventBus>> {
    config.validate()?;

    let _init = INIT_LOCK.lock();
    let mut slot = INSTANCE.write();
    if slot.is_some() {
        return Err(EventBusError::AlreadyInitialized);
    }
    let bus = Arc::new(EventBus::with_config(config));
    *slot = Some(Arc::clone(&bus));
    tracing::info!("Event bus created with {:?}", bus.config());
    Ok(bus)
}

/// Convenience macro to publish an event to the global event bus
#[macro_export]
macro_rules! emit {
    ($event:expr) => {
        $crate::event_bus::event_bus().publish($event)
    };
}

/// Convenience macro to subscribe a closure on the global event bus
#[macro_export]
macro_rules! on_event {
    ($kind:expr, $name:expr, $handler:expr) => {
        $crate::event_bus::event_bus().subscribe_fn($kind, $name, $handler)
    };
}
