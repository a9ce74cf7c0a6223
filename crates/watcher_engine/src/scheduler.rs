use std::time::{Duration, Instant};

use chrono::Utc;
use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use tokio_util::sync::CancellationToken;
use watcher_core::{hostname_of, update, wait_time_ms, CycleOutcome, Effect, Msg, PollState};

use crate::diff::{unified_diff, DEFAULT_MAX_DIFF_LINES};
use crate::extract::extract_element;
use crate::fetch::Fetcher;
use crate::jitter::{GaussianJitter, Jitter};
use crate::normalize::normalize_html;
use crate::notify::Notifier;
use crate::{ChangeEvent, MonitorConfig};

/// Drives fetch → extract → normalize → compare, one cycle at a time, until
/// cancelled. Owns the poll state outright; nothing else mutates it.
pub struct Scheduler<'c> {
    config: &'c MonitorConfig,
    fetcher: Box<dyn Fetcher>,
    notifier: Option<Box<dyn Notifier>>,
    jitter: Box<dyn Jitter>,
    state: PollState,
}

impl<'c> Scheduler<'c> {
    pub fn new(
        config: &'c MonitorConfig,
        fetcher: Box<dyn Fetcher>,
        notifier: Option<Box<dyn Notifier>>,
    ) -> Self {
        Self {
            config,
            fetcher,
            notifier,
            jitter: Box::new(GaussianJitter::new(config.jitter_std_ms)),
            state: PollState::new(),
        }
    }

    pub fn with_jitter(mut self, jitter: Box<dyn Jitter>) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Draws the pause before the next cycle.
    pub fn next_wait(&mut self) -> Duration {
        let offset = self.jitter.offset_ms();
        Duration::from_millis(wait_time_ms(self.config.interval_ms, offset))
    }

    /// Runs cycles until `cancel` fires, then closes the notifier and
    /// returns the final poll state. A pending sleep or an in-flight cycle
    /// is abandoned as soon as cancellation is observed.
    pub async fn run(mut self, cancel: CancellationToken) -> PollState {
        engine_info!("Starting change detector for {}", self.config.url);
        engine_info!("Element selector: {}", self.config.selector);
        engine_info!(
            "Reload interval: {}ms (std: {}ms)",
            self.config.interval_ms,
            self.config.jitter_std_ms
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = self.poll_once() => {}
            }

            let wait = self.next_wait();
            engine_debug!("Next check in {}ms", wait.as_millis());
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(wait) => {}
            }
        }

        engine_info!("Shutting down...");
        self.close().await;
        self.state
    }

    /// Performs exactly one poll cycle and reports how it ended.
    pub async fn poll_once(&mut self) -> CycleOutcome {
        let started = Instant::now();
        if let Some(elapsed) = self.state.since_last_request(started) {
            engine_debug!("Time since last request: {:.2}s", elapsed.as_secs_f64());
        }
        self.apply(Msg::RequestStarted { at: started });

        let msg = match self.fetcher.fetch(&self.config.url).await {
            Err(err) => {
                engine_error!("Failed to fetch page: {}", err);
                Msg::FetchFailed {
                    reason: err.to_string(),
                }
            }
            Ok(output) => {
                engine_debug!(
                    "Fetched {} bytes from {}",
                    output.byte_len,
                    output.final_url
                );
                match extract_element(&output.body, &self.config.selector) {
                    Err(err) => {
                        engine_error!("Failed to extract element: {}", err);
                        Msg::ExtractionFailed {
                            reason: err.to_string(),
                        }
                    }
                    Ok(markup) => {
                        let normalized = normalize_html(&markup);
                        engine_debug!("Normalized content: {}", normalized);
                        Msg::SnapshotTaken(normalized)
                    }
                }
            }
        };

        let effects = self.apply(msg);
        let view = self.state.view();
        let outcome = view.last_outcome.unwrap_or(CycleOutcome::FetchFailed);
        let counts = format!(
            "Success: {}, Errors: {}",
            view.success_count, view.error_count
        );
        match outcome {
            CycleOutcome::BaselineStored => engine_info!("Initial content stored. {}", counts),
            CycleOutcome::Unchanged => engine_info!("No change. {}", counts),
            CycleOutcome::Changed => engine_info!("CHANGE DETECTED! {}", counts),
            CycleOutcome::FetchFailed | CycleOutcome::ExtractionFailed => {}
        }

        for effect in effects {
            self.execute(effect).await;
        }
        outcome
    }

    fn apply(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        effects
    }

    async fn execute(&self, effect: Effect) {
        match effect {
            Effect::Notify { previous, current } => {
                let event = ChangeEvent {
                    diff: unified_diff(&previous, &current, DEFAULT_MAX_DIFF_LINES),
                    url: self.config.url.clone(),
                    hostname: hostname_of(&self.config.url),
                    detected_at: Utc::now().with_timezone(&self.config.timezone),
                    previous,
                    current,
                };
                self.notify(&event).await;
            }
        }
    }

    async fn notify(&self, event: &ChangeEvent) {
        let Some(notifier) = self.notifier.as_ref() else {
            engine_warn!("No notifier configured, skipping notification");
            return;
        };
        match notifier.send_notification(&event.notification()).await {
            Ok(()) => engine_info!("Notification sent to {}", notifier.name()),
            Err(err) => engine_error!("Failed to send notification: {}", err),
        }
    }

    async fn close(&self) {
        if let Some(notifier) = self.notifier.as_ref() {
            notifier.close().await;
        }
    }
}
