use std::time::{Duration, Instant};

use crate::view_model::PollView;

/// How the most recent poll cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    FetchFailed,
    ExtractionFailed,
    BaselineStored,
    Unchanged,
    Changed,
}

/// Mutable state of the poll loop. Owned by a single scheduler and only
/// advanced through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PollState {
    baseline: Option<String>,
    last_request: Option<Instant>,
    success_count: u64,
    error_count: u64,
    last_outcome: Option<CycleOutcome>,
}

impl PollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PollView {
        PollView {
            baseline: self.baseline.clone(),
            success_count: self.success_count,
            error_count: self.error_count,
            last_outcome: self.last_outcome,
        }
    }

    pub fn baseline(&self) -> Option<&str> {
        self.baseline.as_deref()
    }

    pub fn success_count(&self) -> u64 {
        self.success_count
    }

    pub fn error_count(&self) -> u64 {
        self.error_count
    }

    pub fn last_outcome(&self) -> Option<CycleOutcome> {
        self.last_outcome
    }

    /// Time between the previous request and `at`, if there was one.
    pub fn since_last_request(&self, at: Instant) -> Option<Duration> {
        self.last_request
            .map(|previous| at.saturating_duration_since(previous))
    }

    pub(crate) fn record_request(&mut self, at: Instant) {
        self.last_request = Some(at);
    }

    pub(crate) fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub(crate) fn record_error(&mut self) {
        self.error_count += 1;
    }

    pub(crate) fn set_outcome(&mut self, outcome: CycleOutcome) {
        self.last_outcome = Some(outcome);
    }

    /// Replaces the baseline and returns the previous one.
    pub(crate) fn replace_baseline(&mut self, snapshot: String) -> Option<String> {
        self.baseline.replace(snapshot)
    }
}
