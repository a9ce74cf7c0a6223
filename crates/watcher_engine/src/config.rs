use std::time::Duration;

use chrono_tz::Tz;
use thiserror::Error;
use watcher_core::SelectorPath;

pub const DEFAULT_INTERVAL_MS: i64 = 60_000;
pub const DEFAULT_JITTER_STD_MS: f64 = 500.0;
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Paris;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// What to watch and how often. Built once at startup and shared by
/// reference with the scheduler and notifier.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    pub url: String,
    pub selector: SelectorPath,
    /// Base pause between cycles. Values under the wait floor, negative
    /// ones included, end up at the floor.
    pub interval_ms: i64,
    pub jitter_std_ms: f64,
    pub timezone: Tz,
    /// Per-request timeout; `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
}

impl MonitorConfig {
    /// Creates a configuration with default timings for `url`.
    pub fn new(url: impl Into<String>, selector: &str) -> Result<Self, ConfigError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(ConfigError::Missing("TARGET_URL"));
        }
        Ok(Self {
            url,
            selector: SelectorPath::parse(selector),
            interval_ms: DEFAULT_INTERVAL_MS,
            jitter_std_ms: DEFAULT_JITTER_STD_MS,
            timezone: DEFAULT_TIMEZONE,
            request_timeout: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_is_rejected() {
        assert_eq!(
            MonitorConfig::new("  ", "").unwrap_err(),
            ConfigError::Missing("TARGET_URL")
        );
    }

    #[test]
    fn defaults_are_applied() {
        let config = MonitorConfig::new("https://example.com", "#main").unwrap();
        assert_eq!(config.interval_ms, 60_000);
        assert_eq!(config.jitter_std_ms, 500.0);
        assert_eq!(config.timezone, chrono_tz::Europe::Paris);
        assert_eq!(config.selector.steps(), ["#main"]);
        assert_eq!(config.request_timeout, None);
    }
}
