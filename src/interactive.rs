//! Live search prompt.
//!
//! Each line read from stdin stands for the current contents of the search
//! box. Lines starting with `:` are commands:
//!
//! - `:filter all|document|reference`: change the category filter
//! - `:sort relevance|newest|oldest`: re-order the shown results
//! - `:go`: search now, skipping the debounce
//! - `:clear`: empty the search box
//! - `:quit`: exit

use std::io::IsTerminal;

use clap::ValueEnum;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, sleep_until};

use crate::cli::display;
use crate::commands::SearchReport;
use crate::corpus::Corpus;
use crate::search::highlight::{Highlighter, Markers};
use crate::search::{CategoryFilter, SortKey};
use crate::session::{Session, SessionState, Timing};

/// A parsed prompt line.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Input(String),
    Filter(CategoryFilter),
    Sort(SortKey),
    Go,
    Clear,
    Quit,
    Unknown(String),
}

fn parse_line(line: &str) -> Line {
    let Some(command) = line.trim().strip_prefix(':') else {
        return Line::Input(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().unwrap_or_default();

    match name {
        "filter" => CategoryFilter::from_str(arg, true)
            .map_or_else(|_| Line::Unknown(command.to_string()), Line::Filter),
        "sort" => SortKey::from_str(arg, true)
            .map_or_else(|_| Line::Unknown(command.to_string()), Line::Sort),
        "go" => Line::Go,
        "clear" => Line::Clear,
        "quit" | "q" => Line::Quit,
        _ => Line::Unknown(command.to_string()),
    }
}

/// Snapshot the session for display, paired with the query its hits came from.
fn report(session: &Session<'_>) -> SearchReport {
    SearchReport {
        query: session.results_query().to_string(),
        state: session.state(),
        total: session.hits().len(),
        hits: session.hits().to_vec(),
    }
}

fn render(session: &Session<'_>, highlighter: &Highlighter) {
    print!("{}", display::format_report(&report(session), None, Some(highlighter)));
}

/// Run the prompt until stdin closes or `:quit` is entered.
///
/// # Errors
///
/// Returns an error if reading stdin fails.
pub async fn run(corpus: &Corpus, timing: Timing, initial: Option<String>) -> anyhow::Result<()> {
    let markers = if std::io::stdout().is_terminal() {
        Markers::ansi()
    } else {
        Markers::new("*", "*")
    };
    let highlighter = Highlighter::new(markers);
    let mut session = Session::new(corpus, timing);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let Some(query) = initial {
        session.open_with(&query, Instant::now().into_std());
        render(&session, &highlighter);
    }

    loop {
        let deadline = session.next_deadline().map(Instant::from_std);

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let now = Instant::now().into_std();
                let before = session.state();

                match parse_line(&line) {
                    Line::Input(text) => session.input(&text, now),
                    Line::Filter(filter) => session.set_filter(filter, now),
                    Line::Sort(sort) => {
                        session.set_sort(sort);
                        if session.state() == SessionState::Results {
                            render(&session, &highlighter);
                        }
                    }
                    Line::Go => session.submit(now),
                    Line::Clear => session.clear(),
                    Line::Quit => break,
                    Line::Unknown(command) => eprintln!("Unknown command: :{command}"),
                }

                if session.state() != before {
                    render(&session, &highlighter);
                }
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if session.advance(Instant::now().into_std()).is_some() {
                    render(&session, &highlighter);
                }
            }
        }
    }

    Ok(())
}
