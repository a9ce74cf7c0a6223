use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A poll cycle is about to issue its request.
    RequestStarted { at: Instant },
    /// The HTTP request failed (network error or non-2xx status).
    FetchFailed { reason: String },
    /// The page was fetched but the selector path did not resolve.
    ExtractionFailed { reason: String },
    /// The page was fetched and the tracked element normalized to this text.
    SnapshotTaken(String),
}
