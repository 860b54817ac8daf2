//! # Event Bus Module
//!
//! In-process publish/subscribe bus that decouples producers of watchlist
//! events (price fetchers, the refresh loop, watchlist edits) from the
//! consumers that react to them (panels, loggers, persistence).
//!
//! ## Overview
//!
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers register a handler per [`EventKind`]
//! - Handlers run synchronously on the publishing thread, in registration order
//! - A failing or panicking handler is logged and skipped
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pricewatch_core::event_bus::{event_bus, EventKind, FetchFailedEvent};
//! use pricewatch_core::data::Ticker;
//!
//! // Subscribe to fetch failures
//! let handler = event_bus().subscribe_typed::<FetchFailedEvent, _>("status-bar", |e| {
//!     println!("{} failed: {}", e.ticker(), e.reason());
//!     Ok(())
//! });
//!
//! // Publish an event
//! event_bus().publish(FetchFailedEvent::new(Ticker::stock("NOPE"), "HTTP 404"));
//!
//! // Unsubscribe when done
//! event_bus().unsubscribe(EventKind::FetchFailed, &handler);
//! ```

mod bus;
mod config;
mod events;
mod handler;
mod registry;

pub use bus::*;
pub use config::*;
pub use events::*;
pub use handler::*;
pub use registry::*;
