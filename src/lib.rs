//! olx-scraper - Paginate the OLX search API into clean JSON
//!
//! Fetches search pages with TLS fingerprint emulation, flattens each
//! listing into a stable record and saves the lot to a results file.

pub mod commands;
pub mod config;
pub mod olx;
pub mod persist;
pub mod report;

pub use config::Config;
pub use olx::models::{ExtractedListing, RawListing, ResultSet};
