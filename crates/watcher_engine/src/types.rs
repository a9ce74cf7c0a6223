use std::fmt;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::notify::Notification;

pub const CHANGE_TITLE: &str = "Page Change Detected";
pub const CHANGE_MESSAGE: &str = "The monitored webpage has been updated!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub body: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// A detected change, built once and handed to the notifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub previous: String,
    pub current: String,
    pub diff: String,
    pub url: String,
    pub hostname: Option<String>,
    pub detected_at: DateTime<Tz>,
}

impl ChangeEvent {
    pub fn notification(&self) -> Notification<'_> {
        Notification {
            title: CHANGE_TITLE,
            message: CHANGE_MESSAGE,
            url: &self.url,
            hostname: self.hostname.as_deref(),
            diff: Some(self.diff.as_str()).filter(|diff| !diff.is_empty()),
        }
    }
}
