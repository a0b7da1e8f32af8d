//! Writes extracted listings to a JSON results file.

use crate::olx::extractor::extract_all;
use crate::olx::models::{RawListing, ResultSet};
use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

const SCRAPED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedResults {
    pub path: PathBuf,
    pub total_results: usize,
}

/// File name for a search term: `olx_results_<term>.json`.
///
/// Spaces become underscores and the term is lower-cased; nothing else is
/// sanitized.
pub fn results_filename(search_term: &str) -> String {
    format!("olx_results_{}.json", search_term.replace(' ', "_").to_lowercase())
}

/// Extracts every listing and writes the result set into `output_dir`.
///
/// Failures are logged and reported as `None`; they never abort the run.
pub fn save(
    listings: &[RawListing],
    search_term: &str,
    output_dir: &Path,
) -> Option<SavedResults> {
    let result_set = ResultSet::new(
        search_term,
        Local::now().format(SCRAPED_AT_FORMAT).to_string(),
        extract_all(listings),
    );
    let path = output_dir.join(results_filename(search_term));

    if result_set.is_empty() {
        warn!("No listings extracted for '{}', saving an empty result set", search_term);
    }

    match write_result_set(&result_set, &path) {
        Ok(()) => {
            info!("Clean results saved to: {}", path.display());
            info!("Extracted {} listings with full details", result_set.total_results);
            Some(SavedResults { path, total_results: result_set.total_results })
        }
        Err(e) => {
            error!("Error saving file: {:#}", e);
            None
        }
    }
}

/// Serializes `result_set` as indented JSON, replacing any existing file.
pub fn write_result_set(result_set: &ResultSet, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result_set).context("Failed to serialize results")?;

    debug!("Writing {} bytes to {}", json.len(), path.display());
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write results file: {}", path.display()))
}

/// Reads a results file back.
pub fn load_result_set(path: &Path) -> Result<ResultSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read results file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse results file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn make_listings(n: usize) -> Vec<Value> {
        (0..n)
            .map(|i| {
                json!({
                    "ad_id": i.to_string(),
                    "title": format!("Cover {}", i),
                    "price": {"value": {"display": "₹ 750"}},
                    "parameters": [{"key_name": "Type", "formatted_value": "Full body"}]
                })
            })
            .collect()
    }

    #[test]
    fn test_results_filename() {
        assert_eq!(results_filename("Car Cover"), "olx_results_car_cover.json");
        assert_eq!(results_filename("iphone"), "olx_results_iphone.json");
        assert_eq!(results_filename("Royal  Enfield"), "olx_results_royal__enfield.json");
    }

    #[test]
    fn test_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let saved = save(&make_listings(3), "Car Cover", dir.path()).unwrap();

        assert_eq!(saved.path, dir.path().join("olx_results_car_cover.json"));
        assert_eq!(saved.total_results, 3);

        let loaded = load_result_set(&saved.path).unwrap();
        assert_eq!(loaded.search_term, "Car Cover");
        assert_eq!(loaded.total_results, loaded.listings.len());
        assert_eq!(loaded.listings[1].title, "Cover 1");
        assert_eq!(loaded.listings[1].attributes["Type"], "Full body");
        assert!(
            chrono::NaiveDateTime::parse_from_str(&loaded.scraped_at, SCRAPED_AT_FORMAT).is_ok()
        );
    }

    #[test]
    fn test_save_writes_readable_json() {
        let dir = TempDir::new().unwrap();
        let saved = save(&make_listings(1), "car cover", dir.path()).unwrap();

        let content = std::fs::read_to_string(&saved.path).unwrap();
        assert!(content.contains("\n  \"search_term\": \"car cover\""));
        assert!(content.contains("₹ 750"));
        assert!(!content.contains("\\u20b9"));
    }

    #[test]
    fn test_save_drops_failed_extractions() {
        let dir = TempDir::new().unwrap();
        let mut listings = make_listings(2);
        listings.insert(1, json!(["not", "a", "listing"]));

        let saved = save(&listings, "car cover", dir.path()).unwrap();
        assert_eq!(saved.total_results, 2);

        let loaded = load_result_set(&saved.path).unwrap();
        let ids: Vec<&str> = loaded.listings.iter().map(|l| l.ad_id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1"]);
    }

    #[test]
    fn test_save_keeps_attribute_order() {
        let dir = TempDir::new().unwrap();
        let listings = vec![json!({"parameters": [
            {"key_name": "Year", "value": "2020"},
            {"key_name": "Brand", "value": "Acme"},
            {"key_name": "Year", "value": "2021"}
        ]})];

        let saved = save(&listings, "car cover", dir.path()).unwrap();

        let content = std::fs::read_to_string(&saved.path).unwrap();
        let year = content.find("\"Year\": \"2021\"").unwrap();
        let brand = content.find("\"Brand\": \"Acme\"").unwrap();
        assert!(year < brand);
        assert!(!content.contains("2020"));
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        save(&make_listings(5), "car cover", dir.path()).unwrap();
        let saved = save(&make_listings(2), "car cover", dir.path()).unwrap();

        let loaded = load_result_set(&saved.path).unwrap();
        assert_eq!(loaded.total_results, 2);
    }

    #[test]
    fn test_save_empty_listings() {
        let dir = TempDir::new().unwrap();
        let saved = save(&[], "car cover", dir.path()).unwrap();

        let loaded = load_result_set(&saved.path).unwrap();
        assert_eq!(loaded.total_results, 0);
        assert!(loaded.listings.is_empty());
    }

    #[test]
    fn test_save_failure_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does").join("not").join("exist");

        assert!(save(&make_listings(1), "car cover", &missing).is_none());
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ nope").unwrap();

        let err = load_result_set(&path).unwrap_err().to_string();
        assert!(err.contains("Failed to parse results file"));
    }
}
