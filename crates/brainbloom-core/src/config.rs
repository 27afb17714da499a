//! Application configuration model (`config.toml`).

use crate::directory::GeoLocation;
use crate::error::{BloomError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default agent-status polling interval.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RootConfig {
    /// tracing filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub monitor: MonitorSettings,
    /// Location used for resource lookups
    #[serde(default)]
    pub location: GeoLocation,
    #[serde(default)]
    pub mock: MockSettings,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            chat: ChatSettings::default(),
            monitor: MonitorSettings::default(),
            location: GeoLocation::default(),
            mock: MockSettings::default(),
        }
    }
}

impl RootConfig {
    /// Checks values serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.monitor.poll_interval_secs == 0 {
            return Err(BloomError::config("monitor.poll_interval_secs must be at least 1"));
        }
        if self.chat.reply_timeout_secs == Some(0) {
            return Err(BloomError::config("chat.reply_timeout_secs must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mock.failure_rate) {
            return Err(BloomError::config("mock.failure_rate must be between 0.0 and 1.0"));
        }
        if !(-90.0..=90.0).contains(&self.location.lat)
            || !(-180.0..=180.0).contains(&self.location.lng)
        {
            return Err(BloomError::config("location is out of range"));
        }
        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSettings {
    /// Absent means wait for replies indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_timeout_secs: Option<u64>,
}

impl ChatSettings {
    pub fn reply_timeout(&self) -> Option<Duration> {
        self.reply_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl MonitorSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct MockSettings {
    /// Probability that a mock reply fails, 0.0-1.0
    #[serde(default)]
    pub failure_rate: f64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config, RootConfig::default());
        assert_eq!(config.monitor.poll_interval(), Duration::from_secs(5));
        assert!(config.chat.reply_timeout().is_none());
        assert_eq!(config.location, GeoLocation::SAN_FRANCISCO);
    }

    #[test]
    fn test_partial_toml() {
        let config: RootConfig = toml::from_str(
            r#"
            log_level = "debug"

            [chat]
            reply_timeout_secs = 30

            [location]
            lat = 40.7128
            lng = -74.006
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.chat.reply_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.location.lat, 40.7128);
        assert_eq!(config.monitor.poll_interval_secs, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = RootConfig::default();
        config.monitor.poll_interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = RootConfig::default();
        config.mock.failure_rate = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_roundtrips_through_toml() {
        let text = toml::to_string_pretty(&RootConfig::default()).unwrap();
        let parsed: RootConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, RootConfig::default());
    }
}
