//! Point-in-time price observations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ticker::Ticker;

/// Price movement direction
///
/// Only two states exist: an unchanged price reads as `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Change is zero or positive
    Up,
    /// Change is negative
    Down,
}

impl Direction {
    /// Arrow glyph shown next to a price
    pub fn symbol(&self) -> &'static str {
        match self {
            Direction::Up => "▲",
            Direction::Down => "▼",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A price observation for one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    timestamp: DateTime<Utc>,
    price: f64,
    ticker: Ticker,
    change: f64,
    change_pct: f64,
}

impl PriceSnapshot {
    /// Create a snapshot stamped with the current time
    pub fn new(ticker: Ticker, price: f64, change: f64, change_pct: f64) -> Self {
        Self {
            timestamp: Utc::now(),
            price,
            ticker,
            change,
            change_pct,
        }
    }

    /// Replace the observation time
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Absolute change since the previous close
    pub fn change(&self) -> f64 {
        self.change
    }

    /// Percent change since the previous close
    pub fn change_pct(&self) -> f64 {
        self.change_pct
    }

    pub fn is_positive(&self) -> bool {
        self.change_pct >= 0.0
    }

    pub fn direction(&self) -> Direction {
        if self.is_positive() {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub fn direction_symbol(&self) -> &'static str {
        self.direction().symbol()
    }
}

impl fmt::Display for PriceSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.2} {} {:+.2} ({:+.2}%)",
            self.ticker.symbol(),
            self.price,
            self.direction_symbol(),
            self.change,
            self.change_pct
        )
    }
}
