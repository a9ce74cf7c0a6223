//! Watcher core: pure poll-state machine and scheduling arithmetic.
mod effect;
mod hostname;
mod msg;
mod schedule;
mod selector;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use hostname::hostname_of;
pub use msg::Msg;
pub use schedule::{wait_time_ms, MIN_WAIT_MS};
pub use selector::SelectorPath;
pub use state::{CycleOutcome, PollState};
pub use update::update;
pub use view_model::PollView;
