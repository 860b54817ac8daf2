//! # Pricewatch
//!
//! A watchlist price tracker built around an in-process event bus:
//! - Price fetchers publish updates and failures
//! - The watchlist publishes additions and removals
//! - The refresh loop publishes cycle start and completion tallies
//! - Panels, loggers and persistence subscribe to what they need
//!
//! ## Architecture
//!
//! 1. **pricewatch-core** - Market data models, events, subscriber registry, event bus
//! 2. **pricewatch** - This crate: re-exports and logging bootstrap for host binaries

pub use pricewatch_core::data;
pub use pricewatch_core::event_bus;
pub use pricewatch_core::{emit, on_event};

pub use pricewatch_core::{
    init_event_bus, AssetType, ConfigError, Direction, DispatchReport, Event,
    EventBus, EventBusConfig, EventBusError, EventKind, EventPayload, FetchFailedEvent, Handler,
    HandlerError, HandlerResult, PriceSnapshot, PriceUpdateEvent, RefreshCompletedEvent,
    RefreshStartedEvent, Result, SubscriberRegistry, Ticker, TickerAddedEvent, TickerRemovedEvent,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Initialize logging with one JSON object per line on stdout
pub fn init_json_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let fmt_layer = fmt::layer()
        .json()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_thread_ids(true)
        .with_current_span(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
}
