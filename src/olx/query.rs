//! Search query parameters for the relevance search endpoint.

use crate::config::Config;

/// One page request against the search endpoint.
///
/// Everything except `page` comes from configuration and stays fixed for
/// the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub search_term: String,
    pub page: u32,
    pub page_size: u32,
    pub lang: String,
    pub location: String,
    pub location_facet_limit: u32,
    pub facet_limit: u32,
    pub platform: String,
    pub user_id: String,
}

impl SearchQuery {
    /// Builds the first-page query for `search_term`.
    pub fn new(search_term: impl Into<String>, config: &Config) -> Self {
        Self {
            search_term: search_term.into(),
            page: 1,
            page_size: config.page_size,
            lang: config.lang.clone(),
            location: config.location.clone(),
            location_facet_limit: config.location_facet_limit,
            facet_limit: config.facet_limit,
            platform: config.platform.clone(),
            user_id: config.user_id.clone(),
        }
    }

    /// Returns a copy of this query pointing at `page`.
    pub fn with_page(&self, page: u32) -> Self {
        Self { page, ..self.clone() }
    }

    /// Query parameters in the order the site sends them.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("facet_limit", self.facet_limit.to_string()),
            ("lang", self.lang.clone()),
            ("location", self.location.clone()),
            ("location_facet_limit", self.location_facet_limit.to_string()),
            ("page", self.page.to_string()),
            ("platform", self.platform.clone()),
            ("pttEnabled", "true".to_string()),
            ("query", self.search_term.clone()),
            ("relaxedFilters", "true".to_string()),
            ("size", self.page_size.to_string()),
            ("spellcheck", "true".to_string()),
            ("user", self.user_id.clone()),
        ]
    }

    /// Percent-encoded query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.params()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(&v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
