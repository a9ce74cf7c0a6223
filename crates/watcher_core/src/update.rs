use crate::{CycleOutcome, Effect, Msg, PollState};

/// Pure update function: applies a message to state and returns any effects.
///
/// The first snapshot only establishes the baseline. Later snapshots are
/// compared byte for byte, and on a change the baseline is replaced before
/// the notify effect is handed back, so a failed delivery is never retried.
pub fn update(mut state: PollState, msg: Msg) -> (PollState, Vec<Effect>) {
    let effects = match msg {
        Msg::RequestStarted { at } => {
            state.record_request(at);
            Vec::new()
        }
        Msg::FetchFailed { .. } => {
            state.record_error();
            state.set_outcome(CycleOutcome::FetchFailed);
            Vec::new()
        }
        Msg::ExtractionFailed { .. } => {
            // The fetch itself succeeded.
            state.record_success();
            state.record_error();
            state.set_outcome(CycleOutcome::ExtractionFailed);
            Vec::new()
        }
        Msg::SnapshotTaken(snapshot) => {
            state.record_success();
            match state.baseline().map(|baseline| baseline == snapshot) {
                None => {
                    state.replace_baseline(snapshot);
                    state.set_outcome(CycleOutcome::BaselineStored);
                    Vec::new()
                }
                Some(true) => {
                    state.set_outcome(CycleOutcome::Unchanged);
                    Vec::new()
                }
                Some(false) => {
                    let previous = state
                        .replace_baseline(snapshot.clone())
                        .unwrap_or_default();
                    state.set_outcome(CycleOutcome::Changed);
                    vec![Effect::Notify {
                        previous,
                        current: snapshot,
                    }]
                }
            }
        }
    };

    (state, effects)
}
