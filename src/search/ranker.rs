//! Result ordering.

use std::cmp::Reverse;

use chrono::NaiveDate;

use crate::search::{Hit, SortKey};

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse a `DD/MM/YYYY` date.
///
/// Missing or malformed dates compare as [`NaiveDate::MIN`], earlier than
/// any real date.
#[must_use]
pub fn parse_date(date: Option<&str>) -> NaiveDate {
    date.and_then(|d| NaiveDate::parse_from_str(d.trim(), DATE_FORMAT).ok())
        .unwrap_or(NaiveDate::MIN)
}

/// Order `hits` in place by `key`.
///
/// Ties fall back to scan order, so the result does not depend on how the
/// list was ordered before.
pub fn rank(hits: &mut [Hit], key: SortKey) {
    match key {
        SortKey::Relevance => {
            hits.sort_by_key(|hit| (Reverse(hit.score()), hit.ordinal));
        }
        SortKey::Newest => {
            hits.sort_by_cached_key(|hit| (Reverse(parse_date(hit.date.as_deref())), hit.ordinal));
        }
        SortKey::Oldest => {
            hits.sort_by_cached_key(|hit| (parse_date(hit.date.as_deref()), hit.ordinal));
        }
    }
}
