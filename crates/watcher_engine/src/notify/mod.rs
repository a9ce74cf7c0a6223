//! Delivery of change notifications.
//!
//! [`Notifier`] is the capability the scheduler depends on; each binding
//! (currently only Discord) owns whatever transport state it needs.
mod discord;

pub use discord::{build_payload, DiscordNotifier, DISCORD_FIELD_LIMIT};

use thiserror::Error;

/// What a notifier is asked to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub url: &'a str,
    pub hostname: Option<&'a str>,
    pub diff: Option<&'a str>,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notifier misconfigured: {0}")]
    Config(String),
    #[error("failed to encode payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("delivery failed: {0}")]
    Transport(String),
    #[error("delivery rejected with status {status}")]
    Status { status: u16 },
}

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Service name used in delivery log lines.
    fn name(&self) -> &str;

    async fn send_notification(&self, notification: &Notification<'_>) -> Result<(), NotifyError>;

    /// Releases transport resources. Idempotent, and safe to call on a
    /// notifier that never sent anything.
    async fn close(&self);
}
