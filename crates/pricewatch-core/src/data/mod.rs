//! Market data models carried by events
//!
//! This module provides:
//! - Tickers with asset type and display name
//! - Price snapshots with absolute and percent change
//! - The two-state price direction indicator

pub mod snapshot;
pub mod ticker;

pub use snapshot::{Direction, PriceSnapshot};
pub use ticker::{AssetType, Ticker};
