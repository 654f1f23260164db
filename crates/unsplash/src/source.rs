//! Random photo selection on top of [`UnsplashApi`].
//!
//! [`PhotoSource::new`] immediately spawns the request that learns how many
//! pages of results exist. That count is cached, success or failure, for as
//! long as the source lives; every [`PhotoSource::fetch_random`] call awaits
//! the same shared result, including while it is still in flight.

use std::fmt;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use pawpal_core::PhotoRecord;
use rand::Rng;

use crate::api::UnsplashApi;
use crate::config::UnsplashConfig;
use crate::error::PhotoSourceError;
use crate::models::PhotoItem;

type PageCount = Shared<BoxFuture<'static, Result<u32, PhotoSourceError>>>;

/// Supplies random photos from the most relevant search pages.
///
/// Cheap to clone; clones share the HTTP client and the cached page count.
#[derive(Clone)]
pub struct PhotoSource {
    api: Arc<UnsplashApi>,
    pages_available: PageCount,
}

impl PhotoSource {
    /// Create a source and start looking up the page count in the background.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: UnsplashConfig) -> Result<Self, PhotoSourceError> {
        Ok(Self::from_api(UnsplashApi::new(config)?))
    }

    /// Same as [`PhotoSource::new`] for an already-built API client.
    pub fn from_api(api: UnsplashApi) -> Self {
        let api = Arc::new(api);

        let lookup = tokio::spawn({
            let api = Arc::clone(&api);
            async move {
                let result = api.page_count().await;
                match &result {
                    Ok(pages) => tracing::info!(pages, "Unsplash page count resolved"),
                    Err(e) => tracing::error!(error = %e, "Unsplash page count lookup failed"),
                }
                result
            }
        });

        let pages_available = async move {
            lookup
                .await
                .unwrap_or_else(|e| Err(PhotoSourceError::PageCountTask(e.to_string())))
        }
        .boxed()
        .shared();

        Self {
            api,
            pages_available,
        }
    }

    /// Full result pages available, waiting for the lookup if necessary.
    pub async fn pages_available(&self) -> Result<u32, PhotoSourceError> {
        self.pages_available.clone().await
    }

    /// Fetch a random photo.
    ///
    /// Picks a uniform page among the top [`page_fraction`] of pages, then a
    /// uniform photo on that page. Fails without retrying if either request
    /// fails or the page is empty.
    ///
    /// [`page_fraction`]: UnsplashConfig::page_fraction
    pub async fn fetch_random(&self) -> Result<PhotoRecord, PhotoSourceError> {
        let page_count = self.pages_available().await?;
        let page = choose_page(page_count, self.api.config().page_fraction);

        let response = self.api.search_page(page).await?;
        let item = choose_item(response.results).ok_or(PhotoSourceError::EmptyPage { page })?;

        let photo = PhotoRecord::from(item);
        tracing::debug!(page, url = photo.primary_url(), "Fetched random photo");
        Ok(photo)
    }
}

impl fmt::Debug for PhotoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoSource")
            .field("api", &self.api)
            .field("pages_available", &self.pages_available.peek())
            .finish()
    }
}

/// How many of the leading pages to sample from: `floor(page_count ×
/// fraction)`, but never fewer than one.
///
/// ```
/// use pawpal_unsplash::source::pages_to_use;
///
/// assert_eq!(pages_to_use(3, 0.25), 1);
/// assert_eq!(pages_to_use(40, 0.25), 10);
/// ```
pub fn pages_to_use(page_count: u32, fraction: f64) -> u32 {
    let scaled = (f64::from(page_count) * fraction).floor();
    (scaled as u32).max(1)
}

fn choose_page(page_count: u32, fraction: f64) -> u32 {
    rand::rng().random_range(1..=pages_to_use(page_count, fraction))
}

fn choose_item(mut results: Vec<PhotoItem>) -> Option<PhotoItem> {
    if results.is_empty() {
        return None;
    }
    let index = rand::rng().random_range(0..results.len());
    Some(results.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_least_one_page_is_used() {
        assert_eq!(pages_to_use(0, 0.25), 1);
        assert_eq!(pages_to_use(3, 0.25), 1);
        assert_eq!(pages_to_use(7, 0.25), 1);
        assert_eq!(pages_to_use(10, 0.0), 1);
    }

    #[test]
    fn fraction_rounds_down() {
        assert_eq!(pages_to_use(8, 0.25), 2);
        assert_eq!(pages_to_use(11, 0.25), 2);
        assert_eq!(pages_to_use(12, 0.25), 3);
        assert_eq!(pages_to_use(12, 1.0), 12);
    }

    #[test]
    fn chosen_page_stays_in_range() {
        for _ in 0..200 {
            let page = choose_page(40, 0.25);
            assert!((1..=10).contains(&page), "page {page} out of range");
        }
    }

    #[test]
    fn empty_results_choose_nothing() {
        assert!(choose_item(Vec::new()).is_none());
    }
}
