use std::io::IsTerminal;

use clap::Parser;
use sitesearch::cli::{Cli, Commands, display};
use sitesearch::commands;
use sitesearch::search::highlight::Highlighter;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SITESEARCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Search {
            query,
            filter,
            sort,
            limit,
            highlight,
            json,
        }) => {
            let report = commands::search(&query, filter, sort)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let highlighter = highlight
                    .markers(std::io::stdout().is_terminal())
                    .map(Highlighter::new);
                print!("{}", display::format_report(&report, limit, highlighter.as_ref()));
            }
            Ok(())
        }
        Some(Commands::List { filter }) => {
            let records = commands::list(filter)?;
            print!("{}", display::format_listing(&records));
            Ok(())
        }
        Some(Commands::Get { id, filter }) => {
            let detail = commands::get(&id, filter)?;
            print!("{}", display::format_detail(&detail));
            Ok(())
        }
        #[cfg(feature = "interactive")]
        Some(Commands::Interactive { query }) => {
            let config = sitesearch::config::Config::load()?;
            let corpus = commands::load_corpus(&config.content);
            let timing = sitesearch::session::Timing::from(&config.search);
            tokio::runtime::Runtime::new()?.block_on(sitesearch::interactive::run(
                &corpus, timing, query,
            ))
        }
        None => {
            Cli::parse_from(["sitesearch", "--help"]);
            Ok(())
        }
    }
}
