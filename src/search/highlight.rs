//! Match highlighting for displayed fields.

use std::borrow::Cow;

use regex::{Captures, RegexBuilder};

use crate::search::query::escape_pattern;

/// Strings placed around each highlighted match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub open: String,
    pub close: String,
}

impl Markers {
    #[must_use]
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Markup for web pages.
    #[must_use]
    pub fn html() -> Self {
        Self::new(r#"<span class="result-highlight">"#, "</span>")
    }

    /// Bold yellow terminal text.
    #[must_use]
    pub fn ansi() -> Self {
        Self::new("\x1b[1;33m", "\x1b[0m")
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::html()
    }
}

/// Wraps every case-insensitive occurrence of a query in [`Markers`].
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    markers: Markers,
}

impl Highlighter {
    #[must_use]
    pub fn new(markers: Markers) -> Self {
        Self { markers }
    }

    /// Mark all non-overlapping occurrences of `query` in `text`.
    ///
    /// The query is matched literally and without regard to case; matched
    /// text keeps its original casing. An empty query, or one with no
    /// occurrence, returns `text` unchanged.
    #[must_use]
    pub fn highlight<'t>(&self, text: &'t str, query: &str) -> Cow<'t, str> {
        if query.is_empty() {
            return Cow::Borrowed(text);
        }

        let pattern = match RegexBuilder::new(&escape_pattern(query))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::debug!(error = %e, "query not highlightable, leaving text unmarked");
                return Cow::Borrowed(text);
            }
        };

        pattern.replace_all(text, |caps: &Captures| {
            format!("{}{}{}", self.markers.open, &caps[0], self.markers.close)
        })
    }
}
