//! OLX-specific modules for the HTTP client, pagination, extraction, and data models.

pub mod client;
pub mod extractor;
pub mod models;
pub mod paginator;
pub mod path;
pub mod query;

pub use client::{OlxClient, OlxSearch, SearchResponse};
pub use extractor::{extract, extract_all, ExtractError};
pub use models::{ExtractedListing, RawListing, ResultSet};
pub use paginator::{PageOutcome, Pagination, Paginator, StopReason};
pub use query::SearchQuery;
