//! Command implementations behind the CLI.

use serde::Serialize;

use crate::config::{Config, ContentConfig, expand_tilde};
use crate::corpus::{Corpus, SourceCollection};
use crate::search::{self, Category, CategoryFilter, Hit, SortKey};
use crate::session::SessionState;

/// Maximum accepted query length, in characters.
pub const MAX_QUERY_LENGTH: usize = 1000;

/// Load both collections named in `content`.
///
/// A collection that fails to load is logged and left unloaded, so it
/// contributes no records instead of failing the whole search.
#[must_use]
pub fn load_corpus(content: &ContentConfig) -> Corpus {
    Corpus {
        documents: load_or_unloaded(&content.documents),
        reference: load_or_unloaded(&content.reference),
    }
}

fn load_or_unloaded<T: serde::de::DeserializeOwned>(path: &str) -> SourceCollection<T> {
    let path = expand_tilde(path);
    SourceCollection::load(&path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "skipping collection");
        SourceCollection::Unloaded
    })
}

/// Reject queries the search page would never send.
fn validate_query(query: &str) -> anyhow::Result<()> {
    let length = query.chars().count();
    if length > MAX_QUERY_LENGTH {
        anyhow::bail!("Query too long: {length} chars (max {MAX_QUERY_LENGTH})");
    }
    Ok(())
}

/// Outcome of a one-shot search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    /// The query as typed, trimmed.
    pub query: String,
    /// `initial` for an empty query, otherwise `results` or `empty`.
    pub state: SessionState,
    pub total: usize,
    pub hits: Vec<Hit>,
}

/// Search the configured content.
///
/// # Errors
///
/// Returns an error if the query is too long or the config file is invalid.
pub fn search(query: &str, filter: CategoryFilter, sort: SortKey) -> anyhow::Result<SearchReport> {
    validate_query(query)?;
    let config = Config::load()?;
    let corpus = load_corpus(&config.content);
    Ok(search_corpus(&corpus, query, filter, sort))
}

/// Search an already loaded corpus.
#[must_use]
pub fn search_corpus(
    corpus: &Corpus,
    query: &str,
    filter: CategoryFilter,
    sort: SortKey,
) -> SearchReport {
    let query = query.trim();
    let outcome = search::execute(corpus, query, filter, sort);

    let state = if query.is_empty() {
        SessionState::Initial
    } else if outcome.is_empty() {
        SessionState::Empty
    } else {
        SessionState::Results
    };

    SearchReport {
        query: query.to_string(),
        state,
        total: outcome.total(),
        hits: outcome.hits,
    }
}

/// Summary of one record, used for listings.
#[derive(Debug, Clone, Serialize)]
pub struct RecordInfo {
    pub category: Category,
    pub id: String,
    pub title: String,
    pub label: Option<String>,
    pub date: Option<String>,
}

/// List every record in scan order.
///
/// # Errors
///
/// Returns an error if the config file is invalid.
pub fn list(filter: CategoryFilter) -> anyhow::Result<Vec<RecordInfo>> {
    let config = Config::load()?;
    Ok(list_corpus(&load_corpus(&config.content), filter))
}

/// List the records of an already loaded corpus.
#[must_use]
pub fn list_corpus(corpus: &Corpus, filter: CategoryFilter) -> Vec<RecordInfo> {
    let mut records = Vec::new();

    if filter.includes(Category::Document) {
        records.extend(corpus.documents().iter().map(|doc| RecordInfo {
            category: Category::Document,
            id: doc.id.clone(),
            title: doc.title.clone(),
            label: doc.category.clone(),
            date: doc.date.clone(),
        }));
    }

    if filter.includes(Category::Reference) {
        for entry in corpus.reference() {
            records.extend(entry.levels.iter().map(|level| RecordInfo {
                category: Category::Reference,
                id: format!("{}-{}", entry.key, level.key),
                title: format!("{} - {}", entry.name, level.name),
                label: None,
                date: None,
            }));
        }
    }

    records
}

/// Full text of a single record.
#[derive(Debug, Clone, Serialize)]
pub struct RecordDetail {
    pub category: Category,
    pub id: String,
    pub title: String,
    /// Labelled text sections in display order.
    pub sections: Vec<(String, String)>,
}

/// Find a record by id.
///
/// Reference ids take the form `{parent}-{level}`, as shown in search results.
///
/// # Errors
///
/// Returns an error if the config file is invalid, no record has this id, or
/// the id names more than one reference level.
pub fn get(id: &str, filter: CategoryFilter) -> anyhow::Result<RecordDetail> {
    let config = Config::load()?;
    get_from_corpus(&load_corpus(&config.content), id, filter)
}

/// Find a record by id in an already loaded corpus.
///
/// # Errors
///
/// Returns an error if no record has this id, or if several reference levels
/// flatten to the same id.
pub fn get_from_corpus(
    corpus: &Corpus,
    id: &str,
    filter: CategoryFilter,
) -> anyhow::Result<RecordDetail> {
    if filter.includes(Category::Document)
        && let Some(doc) = corpus.documents().iter().find(|d| d.id == id)
    {
        let mut sections = vec![("Excerpt".to_string(), doc.excerpt.clone())];
        if let Some(category) = &doc.category {
            sections.push(("Category".to_string(), category.clone()));
        }
        if let Some(date) = &doc.date {
            sections.push(("Date".to_string(), date.clone()));
        }
        sections.push(("Content".to_string(), doc.content.clone()));

        return Ok(RecordDetail {
            category: Category::Document,
            id: doc.id.clone(),
            title: doc.title.clone(),
            sections,
        });
    }

    if filter.includes(Category::Reference) {
        let matches: Vec<_> = corpus
            .reference()
            .iter()
            .flat_map(|entry| entry.levels.iter().map(move |level| (entry, level)))
            .filter(|(entry, level)| format!("{}-{}", entry.key, level.key) == id)
            .collect();

        if let [(entry, level), rest @ ..] = matches.as_slice() {
            if !rest.is_empty() {
                let candidates: Vec<_> = matches
                    .iter()
                    .map(|(entry, level)| format!("{} / {}", entry.key, level.key))
                    .collect();
                anyhow::bail!("Ambiguous id {id}: matches {}", candidates.join(", "));
            }

            return Ok(RecordDetail {
                category: Category::Reference,
                id: id.to_string(),
                title: format!("{} - {}", entry.name, level.name),
                sections: vec![
                    ("Properties".to_string(), level.properties.clone()),
                    ("Signs".to_string(), level.signs.clone()),
                    ("Storage".to_string(), level.storage.clone()),
                ],
            });
        }
    }

    anyhow::bail!("Record not found: {id}")
}
