//! # Site Search Main Driver
//!
//! ## Purpose
//! CLI entry point for the site search engine. Loads configuration,
//! initializes logging, bootstraps the current-page provider by fetching
//! the page it is asked to stand on, and answers queries — one-shot via
//! `--query`, or interactively from stdin where every line is an explicit
//! submit.
//!
//! ## Architecture Flow
//! 1. Parse command line arguments and load configuration
//! 2. Initialize logging and tracing
//! 3. Fetch and parse the current page into a content provider
//! 4. Construct the engine (the index itself builds lazily on first query)
//! 5. Serve queries

use clap::{Arg, Command};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncBufReadExt;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use site_search::harvest::{HttpTransport, PageTransport, StaticPageProvider};
use site_search::input::SearchInput;
use site_search::render::render_results;
use site_search::{Config, Result, SearchError, SiteSearch};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("site-search")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Site Search Team")
        .about("Site search over a fixed page set with ranked excerpts")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .help("Override the configured site base URL"),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .value_name("PATH")
                .help("Path of the currently loaded page")
                .default_value("index.html"),
        )
        .arg(
            Arg::new("query")
                .short('q')
                .long("query")
                .value_name("TEXT")
                .help("Run a single query and exit"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print one-shot results as JSON instead of markup")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").unwrap();
    let mut config = Config::from_file(config_path)?;

    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.site.base_url = base_url.clone();
    }

    init_logging(&config)?;
    info!("Starting site search v{}", env!("CARGO_PKG_VERSION"));
    info!("Indexing {} configured pages", config.site.pages.len());

    let transport = Arc::new(HttpTransport::new(&config)?);
    let page = matches.get_one::<String>("page").unwrap();
    let provider = Arc::new(load_current_page(page, transport.as_ref()).await);

    let engine = Arc::new(SiteSearch::new(config.clone(), provider, transport)?);

    if let Some(query) = matches.get_one::<String>("query") {
        return run_one_shot(&engine, query, matches.get_flag("json")).await;
    }

    run_interactive(engine, &config).await
}

/// Initialize logging and tracing
fn init_logging(config: &Config) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.logging.level).map_err(|_| {
        SearchError::Config {
            message: format!("Invalid log level: {}", config.logging.level),
        }
    })?;

    if config.logging.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }

    Ok(())
}

/// Fetch and parse the page the search stands on. Degrades to an empty
/// provider when the page cannot be loaded; the remote harvest still runs.
async fn load_current_page(page: &str, transport: &HttpTransport) -> StaticPageProvider {
    match transport.fetch(page).await {
        Ok(markup) => match StaticPageProvider::from_html(page, &markup) {
            Ok(provider) => provider,
            Err(e) => {
                warn!("Could not parse current page '{}': {}", page, e);
                StaticPageProvider::empty(page)
            }
        },
        Err(e) => {
            warn!(
                "Could not load current page '{}': {}; starting with an empty document",
                page, e
            );
            StaticPageProvider::empty(page)
        }
    }
}

/// Answer one query and print the result
async fn run_one_shot(engine: &SiteSearch, query: &str, json: bool) -> Result<()> {
    let results = engine.query(query).await;

    if json {
        let payload =
            serde_json::to_string_pretty(&results).map_err(|e| SearchError::Internal {
                message: format!("Failed to serialize results: {}", e),
            })?;
        println!("{}", payload);
    } else {
        println!("{}", render_results(&results, query.trim()));
    }

    Ok(())
}

/// Read stdin lines as explicit submits and print rendered results
async fn run_interactive(engine: Arc<SiteSearch>, config: &Config) -> Result<()> {
    let debounce = Duration::from_millis(config.search.debounce_ms);
    let (mut input, mut results) = SearchInput::new(engine, debounce);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    println!("Enter a query (empty line clears, Ctrl-D exits):");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => input.submit(&line).await,
                    None => break,
                }
            }
            Some(markup) = results.recv() => {
                if markup.is_empty() {
                    println!("(cleared)");
                } else {
                    println!("{}", markup);
                }
            }
        }
    }

    info!("Shutting down");
    Ok(())
}
