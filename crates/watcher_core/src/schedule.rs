/// Lower bound on the pause between two poll cycles.
pub const MIN_WAIT_MS: u64 = 100;

/// Pause before the next cycle: `base_ms + offset_ms`, floored to whole
/// milliseconds and never below [`MIN_WAIT_MS`].
pub fn wait_time_ms(base_ms: i64, offset_ms: f64) -> u64 {
    let raw = base_ms as f64 + offset_ms;
    // f64::max ignores NaN, so a NaN draw falls back to the floor.
    raw.max(MIN_WAIT_MS as f64).floor() as u64
}
