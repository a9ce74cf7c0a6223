use crate::CycleOutcome;

/// Read-only snapshot of the poll state, used for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PollView {
    pub baseline: Option<String>,
    pub success_count: u64,
    pub error_count: u64,
    pub last_outcome: Option<CycleOutcome>,
}
