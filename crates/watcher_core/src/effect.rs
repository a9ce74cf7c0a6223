/// Side effects requested by [`crate::update`], executed by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The tracked element changed; the baseline already holds `current`.
    Notify { previous: String, current: String },
}
