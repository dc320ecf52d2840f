//! Search pipeline types and entry point.
//!
//! A search runs in three steps: the raw query is normalized
//! ([`query::NormalizedQuery`]), both collections are scanned for substring
//! matches ([`scanner::scan`]), and the hits are ordered by the active sort key
//! ([`ranker::rank`]). Highlighting ([`highlight::Highlighter`]) happens later,
//! per displayed field.

pub mod highlight;
pub mod query;
pub mod ranker;
pub mod scanner;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use query::NormalizedQuery;

/// Which collection a hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Document,
    Reference,
}

impl Category {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Reference => "reference",
        }
    }
}

/// Restricts scanning to one collection or both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// Search every collection.
    #[default]
    All,
    /// Blog posts and articles only.
    #[value(alias = "blog")]
    Document,
    /// Reference dictionary only.
    #[value(alias = "dictionary")]
    Reference,
}

impl CategoryFilter {
    #[must_use]
    pub fn includes(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Document => category == Category::Document,
            Self::Reference => category == Category::Reference,
        }
    }
}

/// Ordering applied to the hit list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Highest score first.
    #[default]
    Relevance,
    /// Most recent date first.
    Newest,
    /// Earliest date first.
    Oldest,
}

/// Relevance tier of a hit, named by the field that matched.
///
/// Scores never combine: a hit takes the tier of its highest-priority match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum Relevance {
    /// Document title contains the query.
    Title,
    /// Document excerpt contains the query (title does not).
    Excerpt,
    /// Only the document body contains the query.
    Body,
    /// Reference sub-entry name contains the query.
    Name,
    /// Some other reference field contains the query.
    Field,
}

impl Relevance {
    #[must_use]
    pub fn score(self) -> u8 {
        match self {
            Self::Title => 10,
            Self::Name => 8,
            Self::Excerpt => 5,
            Self::Field => 3,
            Self::Body => 1,
        }
    }
}

impl From<Relevance> for u8 {
    fn from(relevance: Relevance) -> Self {
        relevance.score()
    }
}

/// Where a hit leads when opened.
///
/// This is a hit's identity: two hits with equal targets are the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Target {
    Document { id: String },
    Reference { parent_key: String, sub_key: String },
}

impl Target {
    /// Page fragment identifying the record on the site.
    #[must_use]
    pub fn anchor(&self) -> String {
        match self {
            Self::Document { id } => format!("blog-{id}"),
            Self::Reference {
                parent_key,
                sub_key,
            } => format!("dictionary-{parent_key}-{sub_key}"),
        }
    }
}

/// A single search result.
#[derive(Debug, Clone, Serialize)]
pub struct Hit {
    pub category: Category,
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// Full searchable text of the record.
    pub content: String,
    pub label: Option<String>,
    pub date: Option<String>,
    pub relevance: Relevance,
    pub target: Target,
    /// Position in scan order, used to break ranking ties.
    #[serde(skip)]
    pub(crate) ordinal: usize,
}

impl Hit {
    #[must_use]
    pub fn score(&self) -> u8 {
        self.relevance.score()
    }
}

/// Result of running one search.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    pub hits: Vec<Hit>,
}

impl Outcome {
    #[must_use]
    pub fn total(&self) -> usize {
        self.hits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Run a full search: normalize, scan, then rank by `sort`.
///
/// An empty or whitespace-only query yields no hits without scanning.
#[must_use]
pub fn execute(corpus: &Corpus, raw_query: &str, filter: CategoryFilter, sort: SortKey) -> Outcome {
    let query = NormalizedQuery::new(raw_query);
    if query.is_empty() {
        return Outcome::default();
    }

    let mut hits = scanner::scan(corpus, &query, filter);
    ranker::rank(&mut hits, sort);

    tracing::debug!(query = query.as_str(), ?filter, ?sort, hits = hits.len(), "search complete");
    Outcome { hits }
}
