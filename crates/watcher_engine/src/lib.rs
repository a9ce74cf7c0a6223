//! Watcher engine: fetch, extraction, normalization, diffing, notification
//! delivery and the poll loop that drives them.
mod config;
mod diff;
mod extract;
mod fetch;
mod jitter;
mod normalize;
mod notify;
mod scheduler;
mod types;

pub use config::{
    ConfigError, MonitorConfig, DEFAULT_INTERVAL_MS, DEFAULT_JITTER_STD_MS, DEFAULT_TIMEZONE,
};
pub use diff::{unified_diff, DEFAULT_MAX_DIFF_LINES};
pub use extract::{extract_element, ExtractError};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, BROWSER_USER_AGENT};
pub use jitter::{GaussianJitter, Jitter};
pub use normalize::normalize_html;
pub use notify::{
    build_payload, DiscordNotifier, Notification, Notifier, NotifyError, DISCORD_FIELD_LIMIT,
};
pub use scheduler::Scheduler;
pub use types::{ChangeEvent, FailureKind, FetchError, FetchOutput};
