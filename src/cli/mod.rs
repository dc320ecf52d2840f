//! CLI interface for sitesearch.
//!
//! Provides command-line argument parsing using clap.

pub mod display;

use clap::{Parser, Subcommand, ValueEnum};

use crate::search::highlight::Markers;
use crate::search::{CategoryFilter, SortKey};

/// How matches are marked in printed excerpts.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum HighlightStyle {
    /// ANSI colors on a terminal, nothing otherwise.
    #[default]
    Auto,
    /// ANSI bold yellow.
    Ansi,
    /// HTML span markup.
    Html,
    /// No highlighting.
    None,
}

impl HighlightStyle {
    /// Resolve to concrete markers; `None` means leave text as is.
    #[must_use]
    pub fn markers(self, is_terminal: bool) -> Option<Markers> {
        match self {
            Self::Auto if is_terminal => Some(Markers::ansi()),
            Self::Auto | Self::None => None,
            Self::Ansi => Some(Markers::ansi()),
            Self::Html => Some(Markers::html()),
        }
    }
}

/// Command-line interface for sitesearch.
#[derive(Parser)]
#[command(name = "sitesearch")]
#[command(author, version, about = "Search site posts and the reference dictionary", long_about = None)]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search posts and reference entries for a query.
    Search {
        /// The search query string.
        query: String,

        /// Restrict results to one collection.
        #[arg(short, long, default_value = "all")]
        filter: CategoryFilter,

        /// Result ordering.
        #[arg(short, long, default_value = "relevance")]
        sort: SortKey,

        /// Maximum number of results to print.
        #[arg(short, long)]
        limit: Option<usize>,

        /// How to mark matches in excerpts.
        #[arg(long, default_value = "auto")]
        highlight: HighlightStyle,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List every searchable record.
    List {
        /// Restrict the listing to one collection.
        #[arg(short, long, default_value = "all")]
        filter: CategoryFilter,
    },

    /// Show the full text of a record by id.
    Get {
        /// Record id (e.g., "3" or "beef-medium-rare").
        id: String,

        /// Restrict the lookup to one collection.
        #[arg(short, long, default_value = "all")]
        filter: CategoryFilter,
    },

    /// Search live as you type.
    #[cfg(feature = "interactive")]
    Interactive {
        /// Query to run on start.
        query: Option<String>,
    },
}
