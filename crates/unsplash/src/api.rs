//! REST client for the Unsplash search endpoint.
//!
//! Every request carries the `Client-ID` authorization header and pins the
//! API version with `Accept-Version: v1`.

use reqwest::header::AUTHORIZATION;

use crate::config::UnsplashConfig;
use crate::error::PhotoSourceError;
use crate::models::SearchResponse;

/// API version requested on every call.
const ACCEPT_VERSION: &str = "v1";

/// Only portrait photos suit the app's layout.
const ORIENTATION: &str = "portrait";

const ORDER_BY: &str = "relevant";

/// Unsplash's strictest safe-search level.
const CONTENT_FILTER: &str = "high";

/// HTTP client for the Unsplash search API.
#[derive(Debug, Clone)]
pub struct UnsplashApi {
    client: reqwest::Client,
    config: UnsplashConfig,
}

impl UnsplashApi {
    /// Build a client with the configured request timeout.
    pub fn new(config: UnsplashConfig) -> Result<Self, PhotoSourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: UnsplashConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &UnsplashConfig {
        &self.config
    }

    /// Number of full result pages available for the configured search.
    ///
    /// Rounds down, so any page in `1..=count` is guaranteed to be full.
    pub async fn page_count(&self) -> Result<u32, PhotoSourceError> {
        let response = self
            .search(None, "find the total pages available")
            .await?;
        let full_pages = response.total / u64::from(self.config.per_page);
        Ok(u32::try_from(full_pages).unwrap_or(u32::MAX))
    }

    /// Fetch one page of search results (1-based).
    pub async fn search_page(&self, page: u32) -> Result<SearchResponse, PhotoSourceError> {
        self.search(Some(page), "fetch a random page of results")
            .await
    }

    // ---- private helpers ----

    async fn search(
        &self,
        page: Option<u32>,
        context: &'static str,
    ) -> Result<SearchResponse, PhotoSourceError> {
        let params = [
            ("query", self.config.query.clone()),
            ("orientation", ORIENTATION.to_string()),
            ("per_page", self.config.per_page.to_string()),
            ("order_by", ORDER_BY.to_string()),
            ("content_filter", CONTENT_FILTER.to_string()),
        ];

        let mut request = self
            .client
            .get(self.config.search_url())
            .header(AUTHORIZATION, format!("Client-ID {}", self.config.access_key))
            .header("Accept-Version", ACCEPT_VERSION)
            .query(&params);
        if let Some(page) = page {
            request = request.query(&[("page", page)]);
        }

        tracing::debug!(?page, "Requesting Unsplash search page");
        let response = request.send().await?;
        let response = Self::ensure_success(response, context).await?;
        Ok(response.json::<SearchResponse>().await?)
    }

    /// Return the response unchanged on success, or a
    /// [`PhotoSourceError::Api`] carrying the status and error payload.
    async fn ensure_success(
        response: reqwest::Response,
        context: &'static str,
    ) -> Result<reqwest::Response, PhotoSourceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), context, "Unsplash request failed");
            return Err(PhotoSourceError::Api {
                status: status.as_u16(),
                context,
                body,
            });
        }
        Ok(response)
    }
}
