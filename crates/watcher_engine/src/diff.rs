use similar::TextDiff;

pub const DEFAULT_MAX_DIFF_LINES: usize = 30;

const CONTEXT_LINES: usize = 2;

/// Unified line diff from `old` ("Previous") to `new` ("Current"), capped at
/// `max_lines` lines plus one marker line when truncated.
pub fn unified_diff(old: &str, new: &str, max_lines: usize) -> String {
    let text_diff = TextDiff::from_lines(old, new);
    let rendered = text_diff
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .missing_newline_hint(false)
        .header("Previous", "Current")
        .to_string();

    let mut lines: Vec<String> = rendered.lines().map(ToOwned::to_owned).collect();
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        lines.push(format!("... (truncated, showing first {max_lines} lines)"));
    }
    lines.join("\n")
}
