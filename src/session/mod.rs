//! Search session state machine.
//!
//! A [`Session`] owns everything that changes while a user searches: the
//! current query text, the category filter, the sort key, the last completed
//! result list, and at most one pending task. Time never advances on its own;
//! callers pass the current [`Instant`] to every operation and call
//! [`Session::advance`] when [`Session::next_deadline`] is reached.
//!
//! Two kinds of task share the single pending slot:
//!
//! - a **debounce** wait after query input, which becomes a scan when it fires
//! - a **scan** waiting out the simulated search latency, which publishes hits
//!
//! Scheduling anything replaces whatever was pending, so only the most
//! recently scheduled search can ever publish results.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::SearchConfig;
use crate::corpus::Corpus;
use crate::search::query::NormalizedQuery;
use crate::search::{self, CategoryFilter, Hit, SortKey, ranker};

/// Which view the presentation surface should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No query yet, or the query was cleared.
    Initial,
    /// A search is in flight.
    Loading,
    /// The last search found at least one hit.
    Results,
    /// The last search found nothing for a non-empty query.
    Empty,
}

/// Delays applied between input and published results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub debounce: Duration,
    pub latency: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            latency: Duration::from_millis(500),
        }
    }
}

impl From<&SearchConfig> for Timing {
    fn from(config: &SearchConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            latency: Duration::from_millis(config.latency_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Debounce,
    Scan,
}

#[derive(Debug, Clone)]
struct Pending {
    phase: Phase,
    due: Instant,
    query: String,
    filter: CategoryFilter,
}

/// Interactive search state over a read-only corpus.
#[derive(Debug)]
pub struct Session<'c> {
    corpus: &'c Corpus,
    timing: Timing,
    query: String,
    filter: CategoryFilter,
    sort: SortKey,
    state: SessionState,
    hits: Vec<Hit>,
    /// Query the current `hits` were found for.
    results_query: String,
    pending: Option<Pending>,
}

impl<'c> Session<'c> {
    #[must_use]
    pub fn new(corpus: &'c Corpus, timing: Timing) -> Self {
        Self {
            corpus,
            timing,
            query: String::new(),
            filter: CategoryFilter::default(),
            sort: SortKey::default(),
            state: SessionState::Initial,
            hits: Vec::new(),
            results_query: String::new(),
            pending: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The current query text, trimmed.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    #[must_use]
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Hits of the last completed search, in display order.
    #[must_use]
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    /// The query that produced [`Session::hits`].
    ///
    /// Differs from [`Session::query`] while newer input is still pending.
    #[must_use]
    pub fn results_query(&self) -> &str {
        &self.results_query
    }

    /// When the pending task is due, if there is one.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Replace the query text, as on a keystroke.
    ///
    /// A non-empty query schedules a debounced search. A query that trims to
    /// empty cancels pending work and returns to [`SessionState::Initial`].
    pub fn input(&mut self, raw: &str, now: Instant) {
        self.query = raw.trim().to_string();

        if NormalizedQuery::new(&self.query).is_empty() {
            self.clear();
            return;
        }

        self.schedule(Phase::Debounce, now + self.timing.debounce);
    }

    /// Search the current query right away, skipping the debounce.
    ///
    /// Does nothing when the query is empty.
    pub fn submit(&mut self, now: Instant) {
        if self.query.is_empty() {
            return;
        }
        self.start_scan(now);
    }

    /// Set the query and submit it, as when a page opens with a query parameter.
    pub fn open_with(&mut self, raw: &str, now: Instant) {
        self.query = raw.trim().to_string();
        if self.query.is_empty() {
            self.clear();
        } else {
            self.start_scan(now);
        }
    }

    /// Drop the query and any pending work.
    pub fn clear(&mut self) {
        self.query.clear();
        self.pending = None;
        self.hits.clear();
        self.results_query.clear();
        self.transition(SessionState::Initial);
    }

    /// Change the category filter, rescanning if a query is active.
    pub fn set_filter(&mut self, filter: CategoryFilter, now: Instant) {
        self.filter = filter;
        if !self.query.is_empty() {
            self.start_scan(now);
        }
    }

    /// Change the sort key, re-ordering the retained hits without rescanning.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        if !self.hits.is_empty() {
            ranker::rank(&mut self.hits, sort);
            tracing::debug!(?sort, hits = self.hits.len(), "re-sorted results");
        }
    }

    /// Run every task due at or before `now`.
    ///
    /// Returns the current state if anything visible changed: a state
    /// transition, or a scan that published a new result list.
    pub fn advance(&mut self, now: Instant) -> Option<SessionState> {
        let before = self.state;
        let mut published = false;

        while let Some(pending) = self.pending.take_if(|p| p.due <= now) {
            match pending.phase {
                Phase::Debounce => {
                    self.pending = Some(Pending {
                        phase: Phase::Scan,
                        due: pending.due + self.timing.latency,
                        ..pending
                    });
                    self.transition(SessionState::Loading);
                }
                Phase::Scan => {
                    self.complete(&pending);
                    published = true;
                }
            }
        }

        (published || self.state != before).then_some(self.state)
    }

    fn start_scan(&mut self, now: Instant) {
        self.schedule(Phase::Scan, now + self.timing.latency);
        self.transition(SessionState::Loading);
    }

    fn schedule(&mut self, phase: Phase, due: Instant) {
        if let Some(previous) = &self.pending {
            tracing::debug!(query = %previous.query, "cancelling pending search");
        }
        self.pending = Some(Pending {
            phase,
            due,
            query: self.query.clone(),
            filter: self.filter,
        });
    }

    fn complete(&mut self, pending: &Pending) {
        self.hits = search::execute(self.corpus, &pending.query, pending.filter, self.sort).hits;
        self.results_query.clone_from(&pending.query);
        let next = if self.hits.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Results
        };
        self.transition(next);
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "session transition");
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Document, ReferenceEntry, ReferenceLevel};
    use crate::search::Category;

    fn doc(id: &str, title: &str, date: &str) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            excerpt: format!("{title} excerpt"),
            content: format!("About {title}"),
            category: None,
            date: Some(date.to_string()),
        }
    }

    fn corpus() -> Corpus {
        Corpus::new(
            vec![
                doc("1", "Pork Curing Guide", "01/01/2024"),
                doc("2", "Salt Curing Deep Dive", "15/06/2024"),
                doc("3", "Grill Temperatures", "10/03/2024"),
            ],
            vec![ReferenceEntry {
                key: "pork".to_string(),
                name: "Pork".to_string(),
                levels: vec![ReferenceLevel {
                    key: "cured".to_string(),
                    name: "Cured".to_string(),
                    properties: "salt curing done".to_string(),
                    signs: "firm".to_string(),
                    storage: "cool and dry".to_string(),
                }],
            }],
        )
    }

    const DEBOUNCE: Duration = Duration::from_millis(300);
    const LATENCY: Duration = Duration::from_millis(500);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn starts_initial() {
            let corpus = corpus();
            let session = Session::new(&corpus, Timing::default());
            assert_eq!(session.state(), SessionState::Initial);
            assert!(session.hits().is_empty());
            assert!(session.next_deadline().is_none());
        }

        #[test]
        fn input_debounces_then_loads_then_publishes() {
            let corpus = corpus();
            let mut session = Session::new(&corpus, Timing::default());
            let t0 = Instant::now();

            session.input("curing", t0);
            assert_eq!(session.state(), SessionState::Initial);
            assert_eq!(session.next_deadline(), Some(t0 + DEBOUNCE));

            assert_eq!(session.advance(t0 + ms(299)), None);
            assert_eq!(session.advance(t0 + DEBOUNCE), Some(SessionState::Loading));
            assert_eq!(session.next_deadline(), Some(t0 + DEBOUNCE + LATENCY));

            assert_eq!(
                session.advance(t0 + DEBOUNCE + LATENCY),
                Some(SessionState::Results)
            );
            assert_eq!(session.hits().len(), 3);
            assert!(session.next_deadline().is_none());
        }

        #[test]
        fn one_late_advance_runs_both_phases() {
            let corpus = corpus();
            let mut session = Session::new(&corpus, Timing::default());
            let t0 = Instant::now();

            session.input("grill", t0);
            assert_eq!(session.advance(t0 + ms(5_000)), Some(SessionState::Results));
            assert_eq!(session.hits()[0].id, "3");
        }

        #[test]
        fn no_match_goes_empty() {
            let corpus = corpus();
            let mut session = Session::new(&corpus, Timing::default());
            let t0 = Instant::now();

            session.submit(t0);
            assert_eq!(session.state(), SessionState::Initial);

            session.open_with("xyznothing", t0);
            assert_eq!(session.state(), SessionState::Loading);
            assert_eq!(session.advance(t0 + LATENCY), Some(SessionState::Empty));
            assert!(session.hits().is_empty());
        }

        #[test]
        fn whitespace_input_returns_to_initial() {
            let corpus = corpus();
            let mut session = Session::new(&corpus, Timing::default());
            let t0 = Instant::now();

            session.open_with("curing", t0);
            session.advance(t0 + LATENCY);
            assert_eq!(session.state(), SessionState::Results);

            session.input("   ", t0 + ms(600));
            assert_eq!(session.state(), SessionState::Initial);
            assert!(session.hits().is_empty());
            assert!(session.next_deadline().is_none());
        }

        #[test]
        fn clear_cancels_in_flight_scan() {
            let corpus = corpus();
            let mut session = Session::new(&corpus, Timing::default());
            let t0 = Instant::now();

            session.open_with("curing", t0);
            session.clear();
            assert_eq!(session.advance(t0 + ms(10_000)), None);
            assert_eq!(session.state(), SessionState::Initial);
            assert_eq!(session.query(), "");
        }
    }

    mod debounce_tests {
        use super::*;

        #[test]
        fn rapid_input_scans_latest_query_only() {
            let corpus = corpus();
            let mut session = Session::new(&corpus, Timing::default());
            let t0 = Instant::now();

            session.input("g", t0);
            session.input("gr", t0 + ms(100));
            session.input("grill", t0 + ms(200));

            // The first keystroke's debounce would have fired here.
            assert_eq!(session.advance(t0 + ms(300)), None);
            assert_eq!(session.next_deadline(), Some(t0 + ms(500)));

            session.advance(t0 + ms(500) + LATENCY);
            assert_eq!(session.hits().len(), 1);
            assert_eq!(session.hits()[0].id, "3");
        }

        #[test]
        fn new_input_replaces_in_flight_scan() {
            let corpus = corpus();
            let mut session = Session::new(&corpus, Timing::default());
            let t0 = Instant::now();

            session.open_with("curing", t0);
            session.input("grill", t0 + ms(100));
            assert_eq!(session.state(), SessionState::Loading);

            // The stale "curing" scan would have completed at t0 + 500ms.
            assert_eq!(session.advance(t0 + LATENCY), None);
            assert!(session.hits().is_empty());

            session.advance(t0 + ms(100) + DEBOUNCE + LATENCY);
            assert_eq!(session.state(), SessionState::Results);
            assert!(session.hits().iter().all(|h| h.id == "3"));
        }

        #[test]
        fn submit_skips_debounce() {
            let corpus = corpus();
            let mut session = Session::new(&corpus, Timing::default());
            let t0 = Instant::now();

            session.input("grill", t0);
            session.submit(t0 + ms(10));
            assert_eq!(session.state(), SessionState::Loading);
            assert_eq!(session.next_deadline(), Some(t0 + ms(10) + LATENCY));
        }
    }

    mod filter_and_sort_tests {
        use super::*;

        #[test]
        fn filter_change_rescans() {
            let corpus = corpus();
            let mut session = Session::new(&corpus, Timing::default());
            let t0 = Instant::now();

            session.open_with("curing", t0);
            session.advance(t0 + LATENCY);
            assert!(session.hits().iter().any(|h| h.category == Category::Reference));

            session.set_filter(CategoryFilter::Document, t0 + ms(600));
            assert_eq!(session.state(), SessionState::Loading);
            session.advance(t0 + ms(600) + LATENCY);
            assert_eq!(session.state(), SessionState::Results);
            assert!(session.hits().iter().all(|h| h.category == Category::Document));
        }

        #[test]
        fn filter_change_without_query_stays_initial() {
            let corpus = corpus();
            let mut session = Session::new(&corpus, Timing::default());
            session.set_filter(CategoryFilter::Reference, Instant::now());
            assert_eq!(session.state(), SessionState::Initial);
            assert_eq!(session.filter(), CategoryFilter::Reference);
            assert!(session.next_deadline().is_none());
        }

        #[test]
        fn sort_change_reorders_without_rescan() {
            let corpus = corpus();
            let mut session = Session::new(&corpus, Timing::default());
            let t0 = Instant::now();

            session.open_with("curing", t0);
            session.advance(t0 + LATENCY);
            let relevance_order: Vec<_> = session.hits().iter().map(|h| h.id.clone()).collect();
            assert_eq!(relevance_order, vec!["1", "2", "pork-cured"]);

            session.set_sort(SortKey::Newest);
            assert_eq!(session.state(), SessionState::Results);
            assert!(session.next_deadline().is_none());
            let newest: Vec<_> = session.hits().iter().map(|h| h.id.as_str()).collect();
            assert_eq!(newest, vec!["2", "1", "pork-cured"]);

            session.set_sort(SortKey::Oldest);
            let oldest: Vec<_> = session.hits().iter().map(|h| h.id.as_str()).collect();
            assert_eq!(oldest, vec!["pork-cured", "1", "2"]);
        }

        #[test]
        fn sort_during_pending_input_keeps_results_query() {
            let corpus = corpus();
            let mut session = Session::new(&corpus, Timing::default());
            let t0 = Instant::now();

            session.open_with("curing", t0);
            session.advance(t0 + LATENCY);
            session.input("grill", t0 + ms(600));
            session.set_sort(SortKey::Newest);

            assert_eq!(session.query(), "grill");
            assert_eq!(session.results_query(), "curing");
            assert_eq!(session.hits()[0].id, "2");

            session.advance(t0 + ms(600) + DEBOUNCE + LATENCY);
            assert_eq!(session.results_query(), "grill");

            session.clear();
            assert_eq!(session.results_query(), "");
        }

        #[test]
        fn active_sort_applies_to_new_results() {
            let corpus = corpus();
            let mut session = Session::new(&corpus, Timing::default());
            let t0 = Instant::now();

            session.set_sort(SortKey::Oldest);
            session.open_with("curing", t0);
            session.advance(t0 + LATENCY);
            assert_eq!(session.hits()[0].id, "pork-cured");
        }
    }
}
