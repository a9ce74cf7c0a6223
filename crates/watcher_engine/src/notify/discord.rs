use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use chrono_tz::Tz;
use engine_logging::engine_debug;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use super::{Notification, Notifier, NotifyError};

/// Discord's maximum length for an embed field value, in characters.
pub const DISCORD_FIELD_LIMIT: usize = 1024;

const EMBED_COLOR: u32 = 0x5865F2;
const FOOTER_TEXT: &str = "Change Detector";
const ELLIPSIS: &str = "...";

#[derive(Debug, Serialize)]
struct WebhookPayload {
    embeds: Vec<Embed>,
}

#[derive(Debug, Serialize)]
struct Embed {
    title: String,
    description: String,
    color: u32,
    fields: Vec<EmbedField>,
    footer: EmbedFooter,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct EmbedField {
    name: &'static str,
    value: String,
    inline: bool,
}

#[derive(Debug, Serialize)]
struct EmbedFooter {
    text: &'static str,
}

/// Builds the webhook JSON body for `notification`, stamped with `timestamp`.
pub fn build_payload(
    notification: &Notification<'_>,
    timestamp: &str,
) -> Result<serde_json::Value, NotifyError> {
    let mut fields = vec![EmbedField {
        name: "🔗 Page URL",
        value: format!("[Click here to view]({})", notification.url),
        inline: false,
    }];

    if let Some(hostname) = notification.hostname.filter(|host| !host.is_empty()) {
        fields.push(EmbedField {
            name: "🌐 Hostname",
            value: format!("`{hostname}`"),
            inline: true,
        });
    }

    if let Some(diff) = notification.diff.filter(|diff| !diff.is_empty()) {
        fields.push(EmbedField {
            name: "📝 Changes",
            value: format!("```diff\n{}\n```", truncate_field(diff)),
            inline: false,
        });
    }

    let payload = WebhookPayload {
        embeds: vec![Embed {
            title: format!("🔔 {}", notification.title),
            description: notification.message.to_string(),
            color: EMBED_COLOR,
            fields,
            footer: EmbedFooter { text: FOOTER_TEXT },
            timestamp: timestamp.to_string(),
        }],
    };
    Ok(serde_json::to_value(payload)?)
}

/// Caps the diff so the rendered field stays within Discord's limit.
fn truncate_field(diff: &str) -> String {
    if diff.chars().count() <= DISCORD_FIELD_LIMIT {
        return diff.to_string();
    }
    let keep = DISCORD_FIELD_LIMIT - ELLIPSIS.len();
    let mut truncated: String = diff.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Posts embeds to a Discord webhook. The HTTP client is opened on first
/// use and dropped by [`Notifier::close`].
pub struct DiscordNotifier {
    webhook_url: String,
    timezone: Tz,
    timeout: Option<Duration>,
    client: Mutex<Option<reqwest::Client>>,
}

impl DiscordNotifier {
    pub fn new(webhook_url: impl Into<String>, timezone: Tz) -> Result<Self, NotifyError> {
        let webhook_url = webhook_url.into();
        if webhook_url.trim().is_empty() {
            return Err(NotifyError::Config(
                "Discord webhook URL cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            webhook_url,
            timezone,
            timeout: None,
            client: Mutex::new(None),
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_open(&self) -> bool {
        self.lock_client().is_some()
    }

    fn lock_client(&self) -> MutexGuard<'_, Option<reqwest::Client>> {
        self.client
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn client(&self) -> Result<reqwest::Client, NotifyError> {
        let mut slot = self.lock_client();
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| NotifyError::Transport(err.to_string()))?;
        *slot = Some(client.clone());
        Ok(client)
    }
}

#[async_trait::async_trait]
impl Notifier for DiscordNotifier {
    fn name(&self) -> &str {
        "Discord"
    }

    async fn send_notification(&self, notification: &Notification<'_>) -> Result<(), NotifyError> {
        let timestamp = Utc::now().with_timezone(&self.timezone).to_rfc3339();
        let body = serde_json::to_vec(&build_payload(notification, &timestamp)?)?;
        let client = self.client()?;

        let response = client
            .post(&self.webhook_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| NotifyError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status {
                status: status.as_u16(),
            });
        }
        engine_debug!("Discord accepted notification with status {}", status);
        Ok(())
    }

    async fn close(&self) {
        if self.lock_client().take().is_some() {
            engine_debug!("Discord notifier closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn notification<'a>(hostname: Option<&'a str>, diff: Option<&'a str>) -> Notification<'a> {
        Notification {
            title: "Page Change Detected",
            message: "The monitored webpage has been updated!",
            url: "https://example.com/page",
            hostname,
            diff,
        }
    }

    #[test]
    fn payload_matches_wire_contract() {
        let payload = build_payload(
            &notification(Some("example.com"), Some("-a\n+b")),
            "2024-03-05T23:07:09+01:00",
        )
        .unwrap();
        let expected = serde_json::json!({
            "embeds": [{
                "title": "🔔 Page Change Detected",
                "description": "The monitored webpage has been updated!",
                "color": 5793266,
                "fields": [
                    {
                        "name": "🔗 Page URL",
                        "value": "[Click here to view](https://example.com/page)",
                        "inline": false
                    },
                    {
                        "name": "🌐 Hostname",
                        "value": "`example.com`",
                        "inline": true
                    },
                    {
                        "name": "📝 Changes",
                        "value": "```diff\n-a\n+b\n```",
                        "inline": false
                    }
                ],
                "footer": { "text": "Change Detector" },
                "timestamp": "2024-03-05T23:07:09+01:00"
            }]
        });
        assert_eq!(payload, expected);
    }

    #[test]
    fn optional_fields_are_omitted() {
        let payload = build_payload(&notification(None, Some("")), "t").unwrap();
        let fields = payload["embeds"][0]["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0]["name"], "🔗 Page URL");
    }

    #[test]
    fn long_diff_is_truncated_to_field_limit() {
        let diff = "x".repeat(2_000);
        let truncated = truncate_field(&diff);
        assert_eq!(truncated.chars().count(), DISCORD_FIELD_LIMIT);
        assert_eq!(truncated, format!("{}...", "x".repeat(1_021)));
    }

    #[test]
    fn diff_at_limit_is_kept() {
        let diff = "é".repeat(DISCORD_FIELD_LIMIT);
        assert_eq!(truncate_field(&diff), diff);
    }

    #[test]
    fn empty_webhook_is_rejected() {
        assert!(matches!(
            DiscordNotifier::new(" ", Tz::UTC),
            Err(NotifyError::Config(_))
        ));
    }

    #[test]
    fn delivery_is_logged_under_discord_name() {
        let notifier = DiscordNotifier::new("https://discord.invalid/hook", Tz::UTC).unwrap();
        assert_eq!(notifier.name(), "Discord");
    }

    #[tokio::test]
    async fn close_is_idempotent_without_open() {
        let notifier = DiscordNotifier::new("https://discord.invalid/hook", Tz::UTC).unwrap();
        assert!(!notifier.is_open());
        notifier.close().await;
        notifier.close().await;
        assert!(!notifier.is_open());
    }
}
