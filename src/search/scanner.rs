//! Substring scanning over the source collections.

use std::collections::HashSet;

use crate::corpus::{Corpus, Document, ReferenceEntry};
use crate::search::query::NormalizedQuery;
use crate::search::{Category, CategoryFilter, Hit, Relevance, Target};

/// A record type that can be tested against a query.
pub trait Searchable {
    /// The collection this record type belongs to.
    const CATEGORY: Category;

    /// Push a hit for every part of this record that matches `query`.
    fn scan_into(&self, query: &NormalizedQuery, hits: &mut Vec<Hit>);
}

impl Searchable for Document {
    const CATEGORY: Category = Category::Document;

    fn scan_into(&self, query: &NormalizedQuery, hits: &mut Vec<Hit>) {
        let title_match = query.found_in(&self.title);
        let excerpt_match = query.found_in(&self.excerpt);
        let body_match = query.found_in(&self.content);

        let relevance = if title_match {
            Relevance::Title
        } else if excerpt_match {
            Relevance::Excerpt
        } else if body_match {
            Relevance::Body
        } else {
            return;
        };

        hits.push(Hit {
            category: Self::CATEGORY,
            id: self.id.clone(),
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            content: self.content.clone(),
            label: self.category.clone(),
            date: self.date.clone(),
            relevance,
            target: Target::Document {
                id: self.id.clone(),
            },
            ordinal: 0,
        });
    }
}

impl Searchable for ReferenceEntry {
    const CATEGORY: Category = Category::Reference;

    fn scan_into(&self, query: &NormalizedQuery, hits: &mut Vec<Hit>) {
        for level in &self.levels {
            let text = level.searchable_text();
            if !query.found_in(&text) {
                continue;
            }

            let relevance = if query.found_in(&level.name) {
                Relevance::Name
            } else {
                Relevance::Field
            };

            hits.push(Hit {
                category: Self::CATEGORY,
                id: format!("{}-{}", self.key, level.key),
                title: format!("{} - {}", self.name, level.name),
                excerpt: level.properties.clone(),
                content: text,
                label: None,
                date: None,
                relevance,
                target: Target::Reference {
                    parent_key: self.key.clone(),
                    sub_key: level.key.clone(),
                },
                ordinal: 0,
            });
        }
    }
}

fn scan_records<T: Searchable>(records: &[T], query: &NormalizedQuery, hits: &mut Vec<Hit>) {
    let before = hits.len();
    for record in records {
        record.scan_into(query, hits);
    }
    tracing::debug!(
        category = T::CATEGORY.label(),
        scanned = records.len(),
        matched = hits.len() - before,
        "scanned collection"
    );
}

/// Scan the collections selected by `filter` for records containing `query`.
///
/// Documents are scanned before reference entries. Hits come back in scan
/// order with their ordinals set; a repeated [`Target`] keeps only its first
/// hit. An empty query matches nothing.
#[must_use]
pub fn scan(corpus: &Corpus, query: &NormalizedQuery, filter: CategoryFilter) -> Vec<Hit> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::new();
    if filter.includes(Category::Document) {
        scan_records(corpus.documents(), query, &mut hits);
    }
    if filter.includes(Category::Reference) {
        scan_records(corpus.reference(), query, &mut hits);
    }

    let mut seen = HashSet::new();
    hits.retain(|hit| {
        let fresh = seen.insert(hit.target.clone());
        if !fresh {
            tracing::debug!(id = %hit.id, category = hit.category.label(), "dropping duplicate hit");
        }
        fresh
    });

    for (ordinal, hit) in hits.iter_mut().enumerate() {
        hit.ordinal = ordinal;
    }
    hits
}
