use std::fmt;

/// Ordered, pipe-delimited chain of CSS selectors. Each step is applied to
/// the subtree matched by the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorPath {
    raw: String,
    steps: Vec<String>,
}

impl SelectorPath {
    /// Splits `raw` on `|`, trimming each segment and dropping empty ones.
    pub fn parse(raw: &str) -> Self {
        let steps = raw
            .split('|')
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        Self {
            raw: raw.to_string(),
            steps,
        }
    }

    /// A blank path tracks the whole document body.
    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// The path as originally configured.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for SelectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank() {
            write!(f, "entire body")
        } else {
            write!(f, "{}", self.raw)
        }
    }
}
