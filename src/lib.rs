//! sitesearch - In-memory search over site posts and a reference dictionary.
//!
//! Queries are matched as case-insensitive substrings against blog documents
//! and reference dictionary entries, scored by which field matched, ordered
//! by relevance or date, and highlighted for display.
//!
//! # Modules
//!
//! - [`corpus`] - Record types and collection loading
//! - [`search`] - Query normalization, scanning, ranking, and highlighting
//! - [`session`] - Debounced search session state machine
//! - [`commands`] - High-level operations (search, list, get)
//! - [`config`] - Configuration loading
//! - [`cli`] - Command-line interface definitions and rendering

pub mod cli;
pub mod commands;
pub mod config;
pub mod corpus;
pub mod search;
pub mod session;

#[cfg(feature = "interactive")]
pub mod interactive;
