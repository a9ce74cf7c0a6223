//! Process configuration, read once from the environment at startup.
//!
//! A `.env` file in the working directory (or a parent) is loaded first;
//! variables already present in the process environment take precedence.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;
use log::LevelFilter;
use watcher_engine::{ConfigError, MonitorConfig, DEFAULT_INTERVAL_MS, DEFAULT_JITTER_STD_MS};

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub monitor: MonitorConfig,
    /// `None` when `WEBHOOK_URL` is empty: changes are only logged.
    pub webhook_url: Option<String>,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset, as docker-compose often passes them through.
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let url = var("TARGET_URL").ok_or(ConfigError::Missing("TARGET_URL"))?;
        let selector = var("ELEMENT_SELECTOR").unwrap_or_default();
        let mut monitor = MonitorConfig::new(url.trim(), &selector)?;

        monitor.interval_ms =
            parse_or("RELOAD_INTERVAL_MS", var("RELOAD_INTERVAL_MS"), DEFAULT_INTERVAL_MS)?;
        monitor.jitter_std_ms = parse_or(
            "RELOAD_JITTER_STD_MS",
            var("RELOAD_JITTER_STD_MS"),
            DEFAULT_JITTER_STD_MS,
        )?;
        if let Some(zone) = var("TIMEZONE") {
            monitor.timezone = parse_value::<Tz>("TIMEZONE", zone.trim())?;
        }
        monitor.request_timeout = var("REQUEST_TIMEOUT_MS")
            .map(|value| parse_value::<u64>("REQUEST_TIMEOUT_MS", value.trim()))
            .transpose()?
            .map(Duration::from_millis);

        let log_level = match var("LOG_LEVEL") {
            Some(level) => parse_level(level.trim())?,
            None => LevelFilter::Info,
        };

        Ok(Self {
            monitor,
            webhook_url: var("WEBHOOK_URL").map(|url| url.trim().to_string()),
            log_level,
            log_file: var("LOG_FILE").map(PathBuf::from),
        })
    }
}

fn parse_or<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        Some(value) => parse_value(name, value.trim()),
        None => Ok(default),
    }
}

fn parse_value<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse().map_err(|err: T::Err| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: err.to_string(),
    })
}

/// Accepts `log` level names plus the long spellings `warning` and `critical`.
fn parse_level(value: &str) -> Result<LevelFilter, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "warning" => Ok(LevelFilter::Warn),
        "critical" => Ok(LevelFilter::Error),
        _ => parse_value("LOG_LEVEL", value),
    }
}
