//! # Pricewatch Core
//!
//! Core types for the pricewatch tracker.
//! Provides the market data models and the event bus that connects price
//! fetchers, the watchlist and its views.

pub mod data;
pub mod error;
pub mod event_bus;

pub use data::{AssetType, Direction, PriceSnapshot, Ticker};

pub use error::{ConfigError, EventBusError, HandlerError, HandlerResult, Result};

// Re-export event bus for convenience
pub use event_bus::{
    event_bus, init_event_bus, DispatchReport, Event, EventBus, EventBusConfig, EventKind,
    EventPayload, FetchFailedEvent, Handler, PriceUpdateEvent, RefreshCompletedEvent,
    RefreshStartedEvent, SubscriberRegistry, TickerAddedEvent, TickerRemovedEvent,
};
