//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Scheme and host of the OLX site
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Response language sent as `lang`
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Location id sent as `location`
    #[serde(default = "default_location")]
    pub location: String,

    #[serde(default = "default_location_facet_limit")]
    pub location_facet_limit: u32,

    #[serde(default = "default_facet_limit")]
    pub facet_limit: u32,

    /// Listings requested per page (`size`)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_platform")]
    pub platform: String,

    /// Anonymous user id sent as `user`
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Maximum number of pages to request
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Lower bound of the random pause between pages in milliseconds
    #[serde(default = "default_delay_min_ms")]
    pub delay_min_ms: u64,

    /// Upper bound of the random pause between pages in milliseconds
    #[serde(default = "default_delay_max_ms")]
    pub delay_max_ms: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Listings shown in detail in the printed summary
    #[serde(default = "default_report_limit")]
    pub report_limit: usize,

    /// Directory the results file is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_base_url() -> String {
    "https://www.olx.in".to_string()
}

fn default_lang() -> String {
    "en-IN".to_string()
}

fn default_location() -> String {
    "1000001".to_string()
}

fn default_location_facet_limit() -> u32 {
    40
}

fn default_facet_limit() -> u32 {
    1000
}

fn default_page_size() -> u32 {
    40
}

fn default_platform() -> String {
    "web-desktop".to_string()
}

fn default_user_id() -> String {
    "0324793783949441".to_string()
}

fn default_max_pages() -> u32 {
    3
}

fn default_delay_min_ms() -> u64 {
    1000
}

fn default_delay_max_ms() -> u64 {
    3000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_report_limit() -> usize {
    10
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            proxy: None,
            lang: default_lang(),
            location: default_location(),
            location_facet_limit: default_location_facet_limit(),
            facet_limit: default_facet_limit(),
            page_size: default_page_size(),
            platform: default_platform(),
            user_id: default_user_id(),
            max_pages: default_max_pages(),
            delay_min_ms: default_delay_min_ms(),
            delay_max_ms: default_delay_max_ms(),
            timeout_secs: default_timeout_secs(),
            report_limit: default_report_limit(),
            output_dir: default_output_dir(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("olx-scraper").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var("OLX_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(proxy) = std::env::var("OLX_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(max_pages) = std::env::var("OLX_MAX_PAGES") {
            if let Ok(n) = max_pages.parse() {
                self.max_pages = n;
            }
        }

        if let Ok(dir) = std::env::var("OLX_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }

        self
    }

    /// Full URL of the relevance search endpoint.
    pub fn search_endpoint(&self) -> String {
        format!("{}/api/relevance/v4/search", self.base_url.trim_end_matches('/'))
    }

    /// Inclusive delay bounds, swapped if configured backwards.
    pub fn delay_bounds(&self) -> (u64, u64) {
        if self.delay_min_ms <= self.delay_max_ms {
            (self.delay_min_ms, self.delay_max_ms)
        } else {
            (self.delay_max_ms, self.delay_min_ms)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://www.olx.in");
        assert_eq!(config.lang, "en-IN");
        assert_eq!(config.location, "1000001");
        assert_eq!(config.location_facet_limit, 40);
        assert_eq!(config.facet_limit, 1000);
        assert_eq!(config.page_size, 40);
        assert_eq!(config.platform, "web-desktop");
        assert_eq!(config.user_id, "0324793783949441");
        assert_eq!(config.max_pages, 3);
        assert_eq!(config.delay_min_ms, 1000);
        assert_eq!(config.delay_max_ms, 3000);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.report_limit, 10);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_search_endpoint() {
        let mut config = Config::new();
        assert_eq!(config.search_endpoint(), "https://www.olx.in/api/relevance/v4/search");

        config.base_url = "http://127.0.0.1:8080/".to_string();
        assert_eq!(config.search_endpoint(), "http://127.0.0.1:8080/api/relevance/v4/search");
    }

    #[test]
    fn test_delay_bounds_swapped() {
        let mut config = Config::new();
        config.delay_min_ms = 5000;
        config.delay_max_ms = 2000;
        assert_eq!(config.delay_bounds(), (2000, 5000));
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            max_pages = 5
            page_size = 20
            delay_min_ms = 0
            delay_max_ms = 0
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.max_pages, 5);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.delay_bounds(), (0, 0));
        // Untouched fields fall back to defaults
        assert_eq!(config.lang, "en-IN");
    }

    #[test]
    fn test_config_from_toml_all_fields() {
        let toml = r#"
            base_url = "https://www.olx.com.pk"
            proxy = "socks5://localhost:1080"
            lang = "en-PK"
            location = "2000001"
            location_facet_limit = 20
            facet_limit = 500
            page_size = 10
            platform = "web-mobile"
            user_id = "42"
            max_pages = 7
            delay_min_ms = 100
            delay_max_ms = 200
            timeout_secs = 5
            report_limit = 25
            output_dir = "/tmp/olx"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.base_url, "https://www.olx.com.pk");
        assert_eq!(config.proxy, Some("socks5://localhost:1080".to_string()));
        assert_eq!(config.lang, "en-PK");
        assert_eq!(config.location, "2000001");
        assert_eq!(config.location_facet_limit, 20);
        assert_eq!(config.facet_limit, 500);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.platform, "web-mobile");
        assert_eq!(config.user_id, "42");
        assert_eq!(config.max_pages, 7);
        assert_eq!(config.delay_bounds(), (100, 200));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.report_limit, 25);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/olx"));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            max_pages = 9
            output_dir = "out"
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.max_pages, 9);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_pages = 1").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.max_pages, 1);
    }

    #[test]
    fn test_config_with_env() {
        let orig_proxy = std::env::var("OLX_PROXY").ok();
        let orig_pages = std::env::var("OLX_MAX_PAGES").ok();

        std::env::set_var("OLX_PROXY", "http://proxy:8080");
        std::env::set_var("OLX_MAX_PAGES", "not_a_number");

        let config = Config::new().with_env();
        assert_eq!(config.proxy, Some("http://proxy:8080".to_string()));
        // Invalid values are ignored
        assert_eq!(config.max_pages, 3);

        match orig_proxy {
            Some(v) => std::env::set_var("OLX_PROXY", v),
            None => std::env::remove_var("OLX_PROXY"),
        }
        match orig_pages {
            Some(v) => std::env::set_var("OLX_MAX_PAGES", v),
            None => std::env::remove_var("OLX_MAX_PAGES"),
        }
    }
}
