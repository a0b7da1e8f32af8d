//! olx-scraper - Paginate the OLX search API into clean JSON
//!
//! Searches, prints a short summary and saves normalized listings.

use anyhow::Result;
use clap::Parser;
use olx_scraper::commands::ScrapeCommand;
use olx_scraper::config::Config;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

const DEFAULT_SEARCH_TERM: &str = "Car Cover";

#[derive(Parser)]
#[command(
    name = "olx-scraper",
    version,
    about = "Paginate the OLX search API and save normalized listings as JSON"
)]
struct Cli {
    /// Search term
    #[arg(default_value = DEFAULT_SEARCH_TERM)]
    query: String,

    /// Maximum number of pages to fetch
    #[arg(short, long)]
    max_pages: Option<u32>,

    /// Directory for the results file
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, env = "OLX_PROXY")]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the printed summary
    #[arg(long)]
    no_report: bool,

    /// Skip writing the results file
    #[arg(long)]
    no_save: bool,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else if cli.quiet {
        EnvFilter::new(Level::WARN.to_string())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()))
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(max_pages) = cli.max_pages {
        config.max_pages = max_pages;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    let cmd = ScrapeCommand::new(config).report(!cli.no_report).save(!cli.no_save);
    cmd.execute(&cli.query).await?;

    Ok(())
}
