//! Page-by-page fetching of search results.

use crate::config::Config;
use crate::olx::client::{OlxSearch, SearchResponse};
use crate::olx::models::RawListing;
use crate::olx::query::SearchQuery;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Top-level field of the response body holding the listings.
const LISTINGS_FIELD: &str = "data";

/// Why pagination ended before running out of pages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StopReason {
    #[error("no more listings after page {page}")]
    EndOfResults { page: u32 },

    #[error("request for page {page} failed with status code: {status}")]
    HttpStatus { page: u32, status: u16 },

    #[error("no listings found in response for page {page}")]
    MissingListings { page: u32 },

    #[error("invalid JSON on page {page}: {message}")]
    Malformed { page: u32, message: String },

    #[error("error on page {page}: {message}")]
    Transport { page: u32, message: String },
}

impl StopReason {
    /// Returns true for the normal end-of-results signal.
    pub fn is_end_of_results(&self) -> bool {
        matches!(self, StopReason::EndOfResults { .. })
    }
}

/// What to do after one page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Continue(Vec<RawListing>),
    Stop(StopReason),
}

/// Result of a pagination run.
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pub listings: Vec<RawListing>,
    pub pages_requested: u32,
    /// `None` when the page budget ran out first
    pub stop: Option<StopReason>,
}

/// Classifies a page response.
///
/// An empty listing array ends pagination; the page itself is still a
/// successful one.
pub fn classify(page: u32, response: &SearchResponse) -> PageOutcome {
    if response.status != 200 {
        return PageOutcome::Stop(StopReason::HttpStatus { page, status: response.status });
    }

    let body: Value = match serde_json::from_str(&response.body) {
        Ok(body) => body,
        Err(e) => {
            return PageOutcome::Stop(StopReason::Malformed { page, message: e.to_string() })
        }
    };

    match body.get(LISTINGS_FIELD) {
        Some(Value::Array(listings)) if listings.is_empty() => {
            PageOutcome::Stop(StopReason::EndOfResults { page })
        }
        Some(Value::Array(listings)) => PageOutcome::Continue(listings.clone()),
        _ => PageOutcome::Stop(StopReason::MissingListings { page }),
    }
}

/// Walks search pages until one comes back empty or fails.
pub struct Paginator<'a, C: OlxSearch + ?Sized> {
    client: &'a C,
    config: &'a Config,
}

impl<'a, C: OlxSearch + ?Sized> Paginator<'a, C> {
    pub fn new(client: &'a C, config: &'a Config) -> Self {
        Self { client, config }
    }

    /// Fetches up to `max_pages` pages and returns every listing gathered.
    pub async fn fetch_all(&self, search_term: &str, max_pages: u32) -> Vec<RawListing> {
        self.paginate(search_term, max_pages).await.listings
    }

    /// Like [`fetch_all`](Self::fetch_all), also reporting why it stopped.
    pub async fn paginate(&self, search_term: &str, max_pages: u32) -> Pagination {
        info!("Searching for: {}", search_term);

        let base = SearchQuery::new(search_term, self.config);
        let mut listings = Vec::new();
        let mut pages_requested = 0;
        let mut stop = None;

        for page in 1..=max_pages {
            if page > 1 {
                self.pause().await;
            }

            info!("Scraping page {}...", page);
            pages_requested += 1;

            match self.fetch_page(&base.with_page(page)).await {
                PageOutcome::Continue(page_listings) => {
                    info!("Found {} listings on page {}", page_listings.len(), page);
                    listings.extend(page_listings);
                }
                PageOutcome::Stop(reason) => {
                    if reason.is_end_of_results() {
                        info!("Found 0 listings on page {}", page);
                        info!("No more listings found.");
                    } else {
                        warn!("{}", reason);
                    }
                    stop = Some(reason);
                    break;
                }
            }
        }

        debug!(
            "Pagination finished after {} page(s) with {} listings",
            pages_requested,
            listings.len()
        );

        Pagination { listings, pages_requested, stop }
    }

    async fn fetch_page(&self, query: &SearchQuery) -> PageOutcome {
        match self.client.search(query).await {
            Ok(response) => {
                info!("Status: {}", response.status);
                classify(query.page, &response)
            }
            Err(e) => PageOutcome::Stop(StopReason::Transport {
                page: query.page,
                message: format!("{:#}", e),
            }),
        }
    }

    /// Fixed random pause between pages.
    async fn pause(&self) {
        let (min, max) = self.config.delay_bounds();
        if max == 0 {
            return;
        }

        let delay = rand::random_range(min..=max);
        debug!("Delaying {}ms", delay);
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}
