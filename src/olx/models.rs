//! Data models for OLX listings and saved result sets.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A listing exactly as the search API returned it.
pub type RawListing = Value;

/// A listing flattened into a stable shape.
///
/// Text fields hold `"N/A"` when the source record did not carry them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedListing {
    pub ad_id: String,
    pub title: String,
    pub description: String,
    /// Display price, e.g. "₹ 1,200"
    pub price: String,
    pub seller_name: String,
    pub user_type: String,
    pub city: String,
    pub state: String,
    pub area: String,
    pub created_at: String,
    /// Parameter label to display value, in the order the API sent them
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
}

/// Everything written to the results file for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    pub search_term: String,
    pub total_results: usize,
    /// Local time, `%Y-%m-%d %H:%M:%S`
    pub scraped_at: String,
    pub listings: Vec<ExtractedListing>,
}

impl ResultSet {
    pub fn new(
        search_term: impl Into<String>,
        scraped_at: impl Into<String>,
        listings: Vec<ExtractedListing>,
    ) -> Self {
        Self {
            search_term: search_term.into(),
            total_results: listings.len(),
            scraped_at: scraped_at.into(),
            listings,
        }
    }

    /// Returns true if no listings were saved.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
