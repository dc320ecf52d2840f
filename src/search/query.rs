//! Query normalization.

/// A lower-cased, trimmed query ready for containment tests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedQuery(String);

impl NormalizedQuery {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the lower-cased `text` contains this query.
    #[must_use]
    pub fn found_in(&self, text: &str) -> bool {
        text.to_lowercase().contains(self.0.as_str())
    }
}

/// Escape `text` so every character matches literally in a regex.
#[must_use]
pub fn escape_pattern(text: &str) -> String {
    regex::escape(text)
}
