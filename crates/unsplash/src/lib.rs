//! Unsplash photo search client.
//!
//! Wraps the Unsplash `/search/photos` endpoint and turns its results into
//! [`PhotoRecord`](pawpal_core::PhotoRecord)s:
//!
//! - [`UnsplashConfig`] -- credential, endpoint and search parameters.
//! - [`UnsplashApi`] -- thin typed wrapper over a single search request.
//! - [`PhotoSource`] -- caches the page count and picks random photos.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod source;

pub use api::UnsplashApi;
pub use config::UnsplashConfig;
pub use error::PhotoSourceError;
pub use source::PhotoSource;
