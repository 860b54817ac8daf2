//! Event bus configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for the event bus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBusConfig {
    /// Warn when a single handler runs longer than this. `None` disables it.
    pub slow_handler_threshold_ms: Option<u64>,
    /// Log at debug level when an event is published with no subscribers.
    pub log_unhandled: bool,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            slow_handler_threshold_ms: Some(250),
            log_unhandled: false,
        }
    }
}

impl EventBusConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slow_handler_threshold_ms == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "slow_handler_threshold_ms".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn slow_handler_threshold(&self) -> Option<Duration> {
        self.slow_handler_threshold_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EventBusConfig::default();
        assert_eq!(
            config.slow_handler_threshold(),
            Some(Duration::from_millis(250))
        );
        assert!(!config.log_unhandled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EventBusConfig::from_toml_str("log_unhandled = true\n").expect("valid config");
        assert!(config.log_unhandled);
        assert_eq!(config.slow_handler_threshold_ms, Some(250));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let err = EventBusConfig::from_toml_str("slow_handler_threshold_ms = 0\n")
            .expect_err("zero threshold is invalid");
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "slow_handler_threshold_ms"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = EventBusConfig::from_toml_str("log_unhandled = \"yes\"")
            .expect_err("wrong type");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "slow_handler_threshold_ms = 1000").expect("write config");

        let config = EventBusConfig::load(file.path()).expect("load config");
        assert_eq!(config.slow_handler_threshold(), Some(Duration::from_secs(1)));

        let missing = EventBusConfig::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
