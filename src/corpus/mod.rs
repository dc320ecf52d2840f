//! Site content records and collection loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading a content collection.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A blog post or article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    /// Short summary shown on result cards.
    #[serde(default)]
    pub excerpt: String,
    /// Full body text.
    #[serde(default)]
    pub content: String,
    /// Category label (e.g., "Recipes", "Techniques").
    #[serde(default)]
    pub category: Option<String>,
    /// Publication date as `DD/MM/YYYY`.
    #[serde(default)]
    pub date: Option<String>,
}

/// A reference dictionary entry grouping named levels under one key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Parent key (e.g., "beef").
    pub key: String,
    /// Display name (e.g., "Beef").
    pub name: String,
    /// Sub-entries in display order.
    #[serde(default)]
    pub levels: Vec<ReferenceLevel>,
}

/// One sub-entry of a [`ReferenceEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceLevel {
    /// Sub-key (e.g., "medium-rare").
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub properties: String,
    #[serde(default)]
    pub signs: String,
    #[serde(default)]
    pub storage: String,
}

impl ReferenceLevel {
    /// Space-joined text of every searchable field.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name, self.properties, self.signs, self.storage
        )
    }
}

/// A read-only record collection that may not have been loaded.
///
/// An unloaded collection behaves exactly like an empty one when scanned.
#[derive(Debug, Clone)]
pub enum SourceCollection<T> {
    Loaded(Vec<T>),
    Unloaded,
}

impl<T> Default for SourceCollection<T> {
    fn default() -> Self {
        Self::Unloaded
    }
}

impl<T> SourceCollection<T> {
    #[must_use]
    pub fn records(&self) -> &[T] {
        match self {
            Self::Loaded(records) => records,
            Self::Unloaded => &[],
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

impl<T: DeserializeOwned> SourceCollection<T> {
    /// Load a collection from a JSON array file.
    ///
    /// A missing file yields `Unloaded` rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `CorpusError::ReadError` if the file exists but cannot be read.
    /// Returns `CorpusError::ParseError` if the JSON is invalid.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "collection file not found, leaving unloaded");
            return Ok(Self::Unloaded);
        }

        let contents = fs::read_to_string(path).map_err(|source| CorpusError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<T> =
            serde_json::from_str(&contents).map_err(|source| CorpusError::ParseError {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(path = %path.display(), records = records.len(), "loaded collection");
        Ok(Self::Loaded(records))
    }
}

/// The two source collections searched together.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub documents: SourceCollection<Document>,
    pub reference: SourceCollection<ReferenceEntry>,
}

impl Corpus {
    #[must_use]
    pub fn new(documents: Vec<Document>, reference: Vec<ReferenceEntry>) -> Self {
        Self {
            documents: SourceCollection::Loaded(documents),
            reference: SourceCollection::Loaded(reference),
        }
    }

    #[must_use]
    pub fn documents(&self) -> &[Document] {
        self.documents.records()
    }

    #[must_use]
    pub fn reference(&self) -> &[ReferenceEntry] {
        self.reference.records()
    }
}
