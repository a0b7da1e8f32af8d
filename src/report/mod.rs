//! Human-readable summary of a search run.

use crate::olx::extractor::extract;
use crate::olx::models::{ExtractedListing, RawListing};
use tracing::warn;

const DEFAULT_LIMIT: usize = 10;
const DEFAULT_DESCRIPTION_CHARS: usize = 100;
const RULE_WIDTH: usize = 70;

/// Renders the first few listings of a run as plain text.
pub struct Reporter {
    limit: usize,
    description_chars: usize,
}

impl Reporter {
    /// Creates a reporter showing the first 10 listings.
    pub fn new() -> Self {
        Self { limit: DEFAULT_LIMIT, description_chars: DEFAULT_DESCRIPTION_CHARS }
    }

    /// Sets how many listings are shown in detail.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Prints the summary to stdout.
    pub fn display(&self, listings: &[RawListing], search_term: &str) {
        println!("{}", self.render(listings, search_term));
    }

    /// Builds the summary text.
    ///
    /// Listings that fail extraction are skipped but keep their position in
    /// the numbering.
    pub fn render(&self, listings: &[RawListing], search_term: &str) -> String {
        let mut lines = Vec::new();

        lines.push(String::new());
        lines.push(format!("Results for '{}':", search_term));
        lines.push("=".repeat(RULE_WIDTH));
        lines.push(format!("Total listings found: {}", listings.len()));
        lines.push(String::new());

        for (i, raw) in listings.iter().take(self.limit).enumerate() {
            match extract(raw) {
                Ok(listing) => {
                    lines.extend(self.listing_lines(i + 1, &listing));
                    lines.push(String::new());
                }
                Err(e) => warn!("Error extracting listing data: {}", e),
            }
        }

        if listings.len() > self.limit {
            let remaining = listings.len() - self.limit;
            let noun = if remaining == 1 { "listing" } else { "listings" };
            lines.push(format!("... and {} more {}", remaining, noun));
        }

        lines.join("\n")
    }

    fn listing_lines(&self, index: usize, listing: &ExtractedListing) -> Vec<String> {
        let mut lines = vec![
            format!("{}. {}", index, listing.title),
            format!("   Price: {}", listing.price),
            format!("   Seller: {} ({})", listing.seller_name, listing.user_type),
            format!("   Location: {}, {}, {}", listing.area, listing.city, listing.state),
            format!("   Posted: {}", listing.created_at),
        ];

        if !listing.attributes.is_empty() {
            lines.push(format!("   Attributes: {} available", listing.attributes.len()));
        }

        lines.push(format!("   Description: {}...", self.truncate(&listing.description)));
        lines
    }

    // Counts characters, not bytes, so multi-byte text is never split.
    fn truncate(&self, text: &str) -> String {
        text.chars().take(self.description_chars).collect()
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}
