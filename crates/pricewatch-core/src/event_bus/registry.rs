//! Subscriber registry keyed by event kind.

use parking_lot::Mutex;
use std::collections::HashMap;

use super::events::EventKind;
use super::handler::Handler;

/// Ordered handler lists per event kind
///
/// One mutex guards the whole map. It is held for lookups, list copies and
/// list edits only, never while a handler runs.
#[derive(Default)]
pub struct SubscriberRegistry {
    subscribers: Mutex<HashMap<EventKind, Vec<Handler>>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the list for `kind`
    ///
    /// Registering the same handler twice is allowed; it will run twice.
    pub fn subscribe(&self, kind: EventKind, handler: Handler) {
        self.subscribers
            .lock()
            .entry(kind)
            .or_default()
            .push(handler);
    }

    /// Remove the first registration of `handler` for `kind`
    ///
    /// Returns true if a registration was removed.
    pub fn unsubscribe(&self, kind: EventKind, handler: &Handler) -> bool {
        let mut subscribers = self.subscribers.lock();
        let Some(handlers) = subscribers.get_mut(&kind) else {
            return false;
        };
        let Some(pos) = handlers.iter().position(|h| h.same_as(handler)) else {
            return false;
        };
        handlers.remove(pos);
        if handlers.is_empty() {
            subscribers.remove(&kind);
        }
        true
    }

    /// Copy of the current handler list for `kind`, in registration order
    pub fn snapshot(&self, kind: EventKind) -> Vec<Handler> {
        self.subscribers
            .lock()
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of registrations for `kind`
    pub fn len(&self, kind: EventKind) -> usize {
        self.subscribers.lock().get(&kind).map_or(0, Vec::len)
    }

    /// Number of registrations across all kinds
    pub fn total(&self) -> usize {
        self.subscribers.lock().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.lock().is_empty()
    }

    /// Drop every registration
    pub fn clear(&self) {
        self.subscribers.lock().clear();
    }
}

impl std::fmt::Debug for SubscriberRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subscribers = self.subscribers.lock();
        let mut map = f.debug_map();
        for (kind, handlers) in subscribers.iter() {
            map.entry(kind, &handlers.len());
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_preserves_order() {
        let registry = SubscriberRegistry::new();
        let a = Handler::from_fn("a", |_| {});
        let b = Handler::from_fn("b", |_| {});
        registry.subscribe(EventKind::RefreshCompleted, a.clone());
        registry.subscribe(EventKind::RefreshCompleted, b.clone());

        let snapshot = registry.snapshot(EventKind::RefreshCompleted);
        assert_eq!(snapshot, vec![a, b]);
        assert_eq!(registry.len(EventKind::RefreshCompleted), 2);
        assert_eq!(registry.len(EventKind::PriceUpdate), 0);
    }

    #[test]
    fn test_duplicate_registration() {
        let registry = SubscriberRegistry::new();
        let a = Handler::from_fn("a", |_| {});
        registry.subscribe(EventKind::TickerAdded, a.clone());
        registry.subscribe(EventKind::TickerAdded, a.clone());
        assert_eq!(registry.len(EventKind::TickerAdded), 2);

        assert!(registry.unsubscribe(EventKind::TickerAdded, &a));
        assert_eq!(registry.len(EventKind::TickerAdded), 1);
    }

    #[test]
    fn test_unsubscribe_unknown_is_noop() {
        let registry = SubscriberRegistry::new();
        let a = Handler::from_fn("a", |_| {});
        let stranger = Handler::from_fn("stranger", |_| {});
        registry.subscribe(EventKind::FetchFailed, a.clone());

        assert!(!registry.unsubscribe(EventKind::RefreshStarted, &a));
        assert!(!registry.unsubscribe(EventKind::FetchFailed, &stranger));
        assert_eq!(registry.snapshot(EventKind::FetchFailed), vec![a]);
        assert_eq!(registry.total(), 1);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let registry = SubscriberRegistry::new();
        let a = Handler::from_fn("a", |_| {});
        registry.subscribe(EventKind::PriceUpdate, a.clone());

        let snapshot = registry.snapshot(EventKind::PriceUpdate);
        registry.unsubscribe(EventKind::PriceUpdate, &a);

        assert_eq!(snapshot.len(), 1);
        assert!(registry.snapshot(EventKind::PriceUpdate).is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_clear() {
        let registry = SubscriberRegistry::new();
        for kind in EventKind::ALL {
            registry.subscribe(kind, Handler::from_fn("h", |_| {}));
        }
        assert_eq!(registry.total(), EventKind::ALL.len());
        registry.clear();
        assert!(registry.is_empty());
    }
}
