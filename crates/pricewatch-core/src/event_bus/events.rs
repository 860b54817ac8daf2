//! Event type definitions for the event bus.
//!
//! Every event is an immutable record stamped with its creation time.
//! Events are cloneable and serializable for logging/forwarding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::{PriceSnapshot, Ticker};

/// Root event enum for all application events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A ticker's price was refreshed
    PriceUpdate(PriceUpdateEvent),
    /// A price fetch failed
    FetchFailed(FetchFailedEvent),
    /// Watchlist gained an entry
    TickerAdded(TickerAddedEvent),
    /// Watchlist lost an entry
    TickerRemoved(TickerRemovedEvent),
    /// A refresh cycle began
    RefreshStarted(RefreshStartedEvent),
    /// A refresh cycle ended
    RefreshCompleted(RefreshCompletedEvent),
}

impl Event {
    /// Get the kind of this event, used as the subscription key
    pub fn kind(&self) -> EventKind {
        match self {
            Event::PriceUpdate(_) => EventKind::PriceUpdate,
            Event::FetchFailed(_) => EventKind::FetchFailed,
            Event::TickerAdded(_) => EventKind::TickerAdded,
            Event::TickerRemoved(_) => EventKind::TickerRemoved,
            Event::RefreshStarted(_) => EventKind::RefreshStarted,
            Event::RefreshCompleted(_) => EventKind::RefreshCompleted,
        }
    }

    /// Creation time of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Event::PriceUpdate(e) => e.timestamp,
            Event::FetchFailed(e) => e.timestamp,
            Event::TickerAdded(e) => e.timestamp,
            Event::TickerRemoved(e) => e.timestamp,
            Event::RefreshStarted(e) => e.timestamp,
            Event::RefreshCompleted(e) => e.timestamp,
        }
    }

    /// The ticker this event concerns, if any
    pub fn ticker(&self) -> Option<&Ticker> {
        match self {
            Event::PriceUpdate(e) => Some(e.snapshot.ticker()),
            Event::FetchFailed(e) => Some(&e.ticker),
            Event::TickerAdded(e) => Some(&e.ticker),
            Event::TickerRemoved(e) => Some(&e.ticker),
            Event::RefreshStarted(_) | Event::RefreshCompleted(_) => None,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            Event::PriceUpdate(e) => format!("Price updated: {}", e.snapshot),
            Event::FetchFailed(e) => {
                format!("Fetch failed for {}: {}", e.ticker.symbol(), e.reason)
            }
            Event::TickerAdded(e) => format!("Ticker added: {}", e.ticker),
            Event::TickerRemoved(e) => format!("Ticker removed: {}", e.ticker),
            Event::RefreshStarted(_) => "Refresh started".to_string(),
            Event::RefreshCompleted(e) => format!(
                "Refresh completed: {} succeeded, {} failed",
                e.success_count, e.failure_count
            ),
        }
    }
}

/// Event kind, one per `Event` variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// `Event::PriceUpdate`
    PriceUpdate,
    /// `Event::FetchFailed`
    FetchFailed,
    /// `Event::TickerAdded`
    TickerAdded,
    /// `Event::TickerRemoved`
    TickerRemoved,
    /// `Event::RefreshStarted`
    RefreshStarted,
    /// `Event::RefreshCompleted`
    RefreshCompleted,
}

impl EventKind {
    /// Every event kind
    pub const ALL: [EventKind; 6] = [
        EventKind::PriceUpdate,
        EventKind::FetchFailed,
        EventKind::TickerAdded,
        EventKind::TickerRemoved,
        EventKind::RefreshStarted,
        EventKind::RefreshCompleted,
    ];
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::PriceUpdate => write!(f, "PriceUpdate"),
            EventKind::FetchFailed => write!(f, "FetchFailed"),
            EventKind::TickerAdded => write!(f, "TickerAdded"),
            EventKind::TickerRemoved => write!(f, "TickerRemoved"),
            EventKind::RefreshStarted => write!(f, "RefreshStarted"),
            EventKind::RefreshCompleted => write!(f, "RefreshCompleted"),
        }
    }
}

/// A concrete event record that can be extracted from an [`Event`]
///
/// Used by typed subscriptions to receive one variant's payload directly.
pub trait EventPayload: Send + Sync + 'static {
    /// Kind that carries this payload
    const KIND: EventKind;

    /// Borrow the payload if `event` is of this kind
    fn from_event(event: &Event) -> Option<&Self>;
}

macro_rules! impl_event_payload {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl EventPayload for $ty {
                const KIND: EventKind = EventKind::$variant;

                fn from_event(event: &Event) -> Option<&Self> {
                    match event {
                        Event::$variant(e) => Some(e),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Event {
                fn from(event: $ty) -> Self {
                    Event::$variant(event)
                }
            }
        )*
    };
}

impl_event_payload! {
    PriceUpdateEvent => PriceUpdate,
    FetchFailedEvent => FetchFailed,
    TickerAddedEvent => TickerAdded,
    TickerRemovedEvent => TickerRemoved,
    RefreshStartedEvent => RefreshStarted,
    RefreshCompletedEvent => RefreshCompleted,
}

/// Fired after a successful price update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdateEvent {
    snapshot: PriceSnapshot,
    timestamp: DateTime<Utc>,
}

impl PriceUpdateEvent {
    pub fn new(snapshot: PriceSnapshot) -> Self {
        Self {
            snapshot,
            timestamp: Utc::now(),
        }
    }

    pub fn snapshot(&self) -> &PriceSnapshot {
        &self.snapshot
    }
}

/// Fired when a fetcher returns nothing (bad ticker, network error)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchFailedEvent {
    ticker: Ticker,
    reason: String,
    timestamp: DateTime<Utc>,
}

impl FetchFailedEvent {
    pub fn new(ticker: Ticker, reason: impl Into<String>) -> Self {
        Self {
            ticker,
            reason: reason.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Fired when a ticker is added to the watchlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerAddedEvent {
    ticker: Ticker,
    timestamp: DateTime<Utc>,
}

impl TickerAddedEvent {
    pub fn new(ticker: Ticker) -> Self {
        Self {
            ticker,
            timestamp: Utc::now(),
        }
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }
}

/// Fired when a ticker is removed from the watchlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerRemovedEvent {
    ticker: Ticker,
    timestamp: DateTime<Utc>,
}

impl TickerRemovedEvent {
    pub fn new(ticker: Ticker) -> Self {
        Self {
            ticker,
            timestamp: Utc::now(),
        }
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }
}

/// Fired when a refresh cycle begins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshStartedEvent {
    timestamp: DateTime<Utc>,
}

impl RefreshStartedEvent {
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now(),
        }
    }
}

impl Default for RefreshStartedEvent {
    fn default() -> Self {
        Self::new()
    }
}

/// Fired when every ticker in a refresh cycle has been processed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshCompletedEvent {
    success_count: u32,
    failure_count: u32,
    timestamp: DateTime<Utc>,
}

impl RefreshCompletedEvent {
    pub fn new(success_count: u32, failure_count: u32) -> Self {
        Self {
            success_count,
            failure_count,
            timestamp: Utc::now(),
        }
    }

    pub fn success_count(&self) -> u32 {
        self.success_count
    }

    pub fn failure_count(&self) -> u32 {
        self.failure_count
    }

    /// Number of tickers processed in the cycle
    pub fn total(&self) -> u64 {
        u64::from(self.success_count) + u64::from(self.failure_count)
    }
}

macro_rules! impl_timestamped {
    ($($ty:ident),* $(,)?) => {
        $(
            impl $ty {
                /// Creation time of the event
                pub fn timestamp(&self) -> DateTime<Utc> {
                    self.timestamp
                }

                /// Replace the creation time (replay, tests)
                pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
                    self.timestamp = timestamp;
                    self
                }
            }
        )*
    };
}

impl_timestamped!(
    PriceUpdateEvent,
    FetchFailedEvent,
    TickerAddedEvent,
    TickerRemovedEvent,
    RefreshStartedEvent,
    RefreshCompletedEvent,
);
