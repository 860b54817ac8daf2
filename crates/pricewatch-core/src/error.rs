//! Error handling for the pricewatch core
//!
//! Provides error types for:
//! - Handler failures (recovered and logged by the bus, never returned)
//! - Event bus configuration
//! - Singleton initialization
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::io;
use thiserror::Error;

/// Failure raised while invoking a subscriber
///
/// The bus builds one of these for its diagnostic line and then moves on
/// to the next subscriber.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Handler returned an error
    #[error("handler returned error: {0:#}")]
    Failed(#[source] anyhow::Error),

    /// Handler panicked
    #[error("handler panicked: {0}")]
    Panicked(String),
}

impl HandlerError {
    /// Build a `Panicked` error from a `catch_unwind` payload
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        HandlerError::Panicked(message)
    }
}

/// Errors related to event bus configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration text is not valid TOML for `EventBusConfig`
    #[error("Failed to parse event bus config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A configuration value is out of range
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue {
        /// The offending key
        key: String,
        /// Why the value was rejected
        reason: String,
    },
}

/// Event bus error type
#[derive(Error, Debug)]
pub enum EventBusError {
    /// The global bus was already created
    #[error("Event bus already initialized")]
    AlreadyInitialized,

    /// Configuration was rejected
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for event bus operations
pub type Result<T> = std::result::Result<T, EventBusError>;

/// Return type of every subscriber callback
pub type HandlerResult = anyhow::Result<()>;
