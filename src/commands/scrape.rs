//! Scrape command: search, report, persist.

use crate::config::Config;
use crate::olx::{OlxClient, OlxSearch, Paginator, StopReason};
use crate::persist::{self, SavedResults};
use crate::report::Reporter;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeSummary {
    pub listings_found: usize,
    pub pages_requested: u32,
    pub stop: Option<StopReason>,
    /// `None` if saving was skipped or failed
    pub saved: Option<SavedResults>,
}

/// Runs one search from first page to results file.
pub struct ScrapeCommand {
    config: Config,
    report: bool,
    save: bool,
}

impl ScrapeCommand {
    /// Creates a new scrape command that reports and saves.
    pub fn new(config: Config) -> Self {
        Self { config, report: true, save: true }
    }

    /// Toggles the printed summary.
    pub fn report(mut self, enabled: bool) -> Self {
        self.report = enabled;
        self
    }

    /// Toggles writing the results file.
    pub fn save(mut self, enabled: bool) -> Self {
        self.save = enabled;
        self
    }

    /// Executes the scrape against the live site.
    pub async fn execute(&self, search_term: &str) -> Result<ScrapeSummary> {
        let client = OlxClient::new(&self.config).context("Failed to create HTTP client")?;
        debug!("Search endpoint: {}", client.endpoint());

        Ok(self.execute_with_client(&client, search_term).await)
    }

    /// Executes the scrape with a provided client (for testing).
    ///
    /// Never fails: fetch, extraction and save problems are logged and the
    /// run finishes with whatever was gathered.
    pub async fn execute_with_client(
        &self,
        client: &(impl OlxSearch + ?Sized),
        search_term: &str,
    ) -> ScrapeSummary {
        info!("Starting OLX scraper...");

        let pagination =
            Paginator::new(client, &self.config).paginate(search_term, self.config.max_pages).await;

        if self.report {
            Reporter::new()
                .with_limit(self.config.report_limit)
                .display(&pagination.listings, search_term);
        }

        let saved = if self.save {
            persist::save(&pagination.listings, search_term, &self.config.output_dir)
        } else {
            None
        };

        info!("Scraping completed.");

        ScrapeSummary {
            listings_found: pagination.listings.len(),
            pages_requested: pagination.pages_requested,
            stop: pagination.stop,
            saved,
        }
    }
}
