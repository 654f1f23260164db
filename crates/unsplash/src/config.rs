//! Search configuration for the Unsplash client.

use std::fmt;
use std::time::Duration;

/// Public Unsplash API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.unsplash.com";

/// Search term used to find photos.
pub const DEFAULT_QUERY: &str = "dog";

/// Results per page; the Unsplash maximum.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Share of the available pages, most relevant first, that photos are drawn
/// from. Broad searches drift off-topic on later pages.
pub const DEFAULT_PAGE_FRACTION: f64 = 0.25;

/// HTTP timeout for a single request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything needed to query Unsplash.
///
/// Built with [`UnsplashConfig::new`] and adjusted with the `with_*`
/// methods. The access key is redacted from `Debug` output.
#[derive(Clone)]
pub struct UnsplashConfig {
    pub access_key: String,
    /// Base URL without a trailing path, e.g. `https://api.unsplash.com`.
    pub api_url: String,
    pub query: String,
    pub per_page: u32,
    pub page_fraction: f64,
    pub request_timeout: Duration,
}

impl UnsplashConfig {
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            query: DEFAULT_QUERY.to_string(),
            per_page: DEFAULT_PER_PAGE,
            page_fraction: DEFAULT_PAGE_FRACTION,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Clamped to at least one result per page.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Clamped to `0.0..=1.0`.
    pub fn with_page_fraction(mut self, page_fraction: f64) -> Self {
        self.page_fraction = page_fraction.clamp(0.0, 1.0);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Full URL of the search endpoint.
    pub fn search_url(&self) -> String {
        format!("{}/search/photos", self.api_url)
    }
}

impl fmt::Debug for UnsplashConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnsplashConfig")
            .field("access_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("query", &self.query)
            .field("per_page", &self.per_page)
            .field("page_fraction", &self.page_fraction)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_public_api() {
        let config = UnsplashConfig::new("key");
        assert_eq!(config.search_url(), "https://api.unsplash.com/search/photos");
        assert_eq!(config.query, "dog");
        assert_eq!(config.per_page, 30);
        assert_eq!(config.page_fraction, 0.25);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = UnsplashConfig::new("key").with_api_url("http://127.0.0.1:9000/");
        assert_eq!(config.search_url(), "http://127.0.0.1:9000/search/photos");
    }

    #[test]
    fn per_page_and_fraction_are_clamped() {
        let config = UnsplashConfig::new("key")
            .with_per_page(0)
            .with_page_fraction(3.0);
        assert_eq!(config.per_page, 1);
        assert_eq!(config.page_fraction, 1.0);
    }

    #[test]
    fn debug_hides_access_key() {
        let rendered = format!("{:?}", UnsplashConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
