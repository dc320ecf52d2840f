//! Terminal rendering of search results.

use std::fmt::Write;

use crate::commands::{RecordDetail, RecordInfo, SearchReport};
use crate::search::highlight::Highlighter;
use crate::search::{Category, Hit};
use crate::session::SessionState;

fn badge(category: Category) -> &'static str {
    match category {
        Category::Document => "[Blog]",
        Category::Reference => "[Dictionary]",
    }
}

/// Render one result card.
#[must_use]
pub fn format_hit(hit: &Hit, query: &str, highlighter: Option<&Highlighter>) -> String {
    let excerpt = match highlighter {
        Some(hl) => hl.highlight(&hit.excerpt, query).into_owned(),
        None => hit.excerpt.clone(),
    };

    let mut out = format!("{} {}\n", badge(hit.category), hit.title);
    if !excerpt.is_empty() {
        let _ = writeln!(out, "    {excerpt}");
    }

    let mut meta = Vec::new();
    if let Some(label) = &hit.label {
        meta.push(label.clone());
    }
    if let Some(date) = &hit.date {
        meta.push(date.clone());
    }
    meta.push(format!("#{}", hit.target.anchor()));
    let _ = writeln!(out, "    {}", meta.join(" | "));
    out
}

/// Render a full search report, showing at most `limit` cards.
#[must_use]
pub fn format_report(
    report: &SearchReport,
    limit: Option<usize>,
    highlighter: Option<&Highlighter>,
) -> String {
    match report.state {
        SessionState::Initial => "Enter a query to search posts and the dictionary.\n".to_string(),
        SessionState::Loading => "Searching...\n".to_string(),
        SessionState::Empty => format!("No matches found for '{}'\n", report.query),
        SessionState::Results => {
            let mut out = format!("{} result(s) found\n\n", report.total);
            let shown = limit.unwrap_or(report.hits.len());
            for hit in report.hits.iter().take(shown) {
                out.push_str(&format_hit(hit, &report.query, highlighter));
                out.push('\n');
            }
            out
        }
    }
}

/// Render a record listing, one line per record.
#[must_use]
pub fn format_listing(records: &[RecordInfo]) -> String {
    if records.is_empty() {
        return "No records found.\n".to_string();
    }

    let mut out = String::new();
    for record in records {
        let _ = write!(out, "{:<13} {:<24} {}", badge(record.category), record.id, record.title);
        if let Some(date) = &record.date {
            let _ = write!(out, " ({date})");
        }
        out.push('\n');
    }
    let _ = writeln!(out, "\n{} record(s)", records.len());
    out
}

/// Render a record's full text.
#[must_use]
pub fn format_detail(detail: &RecordDetail) -> String {
    let mut out = format!("{} {}\n", badge(detail.category), detail.title);
    for (heading, text) in &detail.sections {
        if text.is_empty() {
            continue;
        }
        let _ = write!(out, "\n{heading}:\n{text}\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::highlight::Markers;
    use crate::search::{Relevance, Target};

    fn hit() -> Hit {
        Hit {
            category: Category::Document,
            id: "4".to_string(),
            title: "Brining Basics".to_string(),
            excerpt: "Brine keeps meat moist".to_string(),
            content: String::new(),
            label: Some("Techniques".to_string()),
            date: Some("02/03/2024".to_string()),
            relevance: Relevance::Title,
            target: Target::Document {
                id: "4".to_string(),
            },
            ordinal: 0,
        }
    }

    fn report(state: SessionState, hits: Vec<Hit>) -> SearchReport {
        SearchReport {
            query: "brine".to_string(),
            state,
            total: hits.len(),
            hits,
        }
    }

    #[test]
    fn card_shows_meta_and_anchor() {
        let card = format_hit(&hit(), "brine", None);
        assert!(card.starts_with("[Blog] Brining Basics"));
        assert!(card.contains("Techniques | 02/03/2024 | #blog-4"));
    }

    #[test]
    fn card_highlights_excerpt() {
        let hl = Highlighter::new(Markers::new("<", ">"));
        let card = format_hit(&hit(), "brine", Some(&hl));
        assert!(card.contains("<Brine> keeps meat moist"));
    }

    #[test]
    fn report_states() {
        assert!(
            format_report(&report(SessionState::Initial, vec![]), None, None)
                .contains("Enter a query")
        );
        assert!(
            format_report(&report(SessionState::Empty, vec![]), None, None)
                .contains("No matches found for 'brine'")
        );
        let out = format_report(&report(SessionState::Results, vec![hit()]), None, None);
        assert!(out.starts_with("1 result(s) found"));
    }

    #[test]
    fn loading_is_not_shown_as_empty() {
        let out = format_report(&report(SessionState::Loading, vec![]), None, None);
        assert_eq!(out, "Searching...\n");
        assert!(!out.contains("No matches"));
    }

    #[test]
    fn limit_truncates_cards_not_count() {
        let mut second = hit();
        second.id = "5".to_string();
        second.title = "Brine Math".to_string();
        let out = format_report(&report(SessionState::Results, vec![hit(), second]), Some(1), None);
        assert!(out.starts_with("2 result(s) found"));
        assert!(out.contains("Brining Basics"));
        assert!(!out.contains("Brine Math"));
    }
}
