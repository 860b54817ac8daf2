//! Subscriber callbacks.

use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use super::events::{Event, EventPayload};
use crate::error::HandlerResult;

type Callback = dyn Fn(&Event) -> HandlerResult + Send + Sync;

/// A registered event handler
///
/// Cloning is cheap and the clone refers to the same callable, so a clone
/// can be kept to unsubscribe later. Two handlers are equal only when they
/// share the same callable; wrapping the same closure logic twice yields
/// two distinct handlers.
#[derive(Clone)]
pub struct Handler {
    id: Uuid,
    name: Arc<str>,
    callback: Arc<Callback>,
}

impl Handler {
    /// Wrap a fallible callback
    pub fn new<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Event) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            id: Uuid::new_v4(),
            name: Arc::from(name.into()),
            callback: Arc::new(callback),
        }
    }

    /// Wrap a callback that cannot fail
    pub fn from_fn<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        Self::new(name, move |event| {
            callback(event);
            Ok(())
        })
    }

    /// Wrap a callback for one event payload type
    ///
    /// Events of any other kind are ignored by the wrapper.
    pub fn typed<E, F>(name: impl Into<String>, callback: F) -> Self
    where
        E: EventPayload,
        F: Fn(&E) -> HandlerResult + Send + Sync + 'static,
    {
        Self::new(name, move |event| match E::from_event(event) {
            Some(payload) => callback(payload),
            None => Ok(()),
        })
    }

    /// Name used in diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the callback
    pub fn call(&self, event: &Event) -> HandlerResult {
        (self.callback)(event)
    }

    /// Whether `other` wraps the same callable
    pub fn same_as(&self, other: &Handler) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for Handler {}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, &self.id.to_string()[..8])
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::events::{RefreshCompletedEvent, RefreshStartedEvent};
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_identity_is_by_callable() {
        let a = Handler::from_fn("a", |_| {});
        let a_clone = a.clone();
        let a_again = Handler::from_fn("a", |_| {});

        assert_eq!(a, a_clone);
        assert_ne!(a, a_again);
    }

    #[test]
    fn test_typed_handler_ignores_other_kinds() {
        let seen = Arc::new(AtomicU32::new(0));
        let s = seen.clone();
        let handler = Handler::typed::<RefreshCompletedEvent, _>("tally", move |e| {
            s.fetch_add(e.success_count(), Ordering::SeqCst);
            Ok(())
        });

        handler
            .call(&RefreshStartedEvent::new().into())
            .expect("ignored kind is ok");
        handler
            .call(&RefreshCompletedEvent::new(3, 1).into())
            .expect("handler succeeds");
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_display_includes_name() {
        let handler = Handler::from_fn("price-panel", |_| {});
        let shown = handler.to_string();
        assert!(shown.starts_with("price-panel#"));
        assert_eq!(shown.len(), "price-panel#".len() + 8);
    }
}
