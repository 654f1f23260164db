use std::sync::Arc;

/// Errors from fetching photos.
///
/// `Clone` so a single page-count failure can be handed to every caller
/// waiting on it; the underlying [`reqwest::Error`] is shared behind an
/// [`Arc`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum PhotoSourceError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decoding).
    #[error("HTTP request failed: {0}")]
    Request(Arc<reqwest::Error>),

    /// Unsplash returned a non-2xx status code.
    #[error("Unsplash API error ({status}) when trying to {context}: {body}")]
    Api {
        status: u16,
        /// What the request was for.
        context: &'static str,
        /// Raw error payload.
        body: String,
    },

    /// The chosen results page was empty.
    #[error("Search page {page} returned no photos")]
    EmptyPage { page: u32 },

    /// The background page-count lookup panicked or was cancelled.
    #[error("Page count lookup did not complete: {0}")]
    PageCountTask(String),
}

impl From<reqwest::Error> for PhotoSourceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(Arc::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_status_and_body() {
        let err = PhotoSourceError::Api {
            status: 401,
            context: "find the total pages available",
            body: r#"{"errors":["OAuth error: The access token is invalid"]}"#.to_string(),
        };
        let text = err.to_string();
        assert!(text.starts_with("Unsplash API error (401) when trying to find"));
        assert!(text.contains("OAuth error"));
    }

    #[test]
    fn request_error_display() {
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = PhotoSourceError::from(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
