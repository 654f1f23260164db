//! Immutable description of a single photo.

use serde::{Deserialize, Serialize};

/// JPEG quality requested alongside a display width.
const SIZED_QUALITY: u32 = 80;

/// One photo returned by the photo source.
///
/// Fields are private so a record cannot change after construction; use
/// [`PhotoRecord::new`] plus the `with_*` builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    primary_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thumbnail_url: Option<String>,
    alt_text: String,
    creator_name: String,
    creator_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
}

impl PhotoRecord {
    pub fn new(
        primary_url: impl Into<String>,
        alt_text: impl Into<String>,
        creator_name: impl Into<String>,
        creator_url: impl Into<String>,
    ) -> Self {
        Self {
            primary_url: primary_url.into(),
            thumbnail_url: None,
            alt_text: alt_text.into(),
            creator_name: creator_name.into(),
            creator_url: creator_url.into(),
            width: None,
            height: None,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(thumbnail_url.into());
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn primary_url(&self) -> &str {
        &self.primary_url
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }

    pub fn alt_text(&self) -> &str {
        &self.alt_text
    }

    pub fn creator_name(&self) -> &str {
        &self.creator_name
    }

    pub fn creator_url(&self) -> &str {
        &self.creator_url
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    /// URL requesting the photo scaled to `width` pixels.
    ///
    /// The primary URL is the photo's base image URL, which accepts sizing
    /// parameters in its query string.
    ///
    /// ```
    /// use pawpal_core::PhotoRecord;
    ///
    /// let photo = PhotoRecord::new("https://img.test/a?ixid=1", "", "", "");
    /// assert_eq!(photo.sized_url(400), "https://img.test/a?ixid=1&q=80&w=400");
    /// ```
    pub fn sized_url(&self, width: u32) -> String {
        let separator = if self.primary_url.contains('?') {
            '&'
        } else {
            '?'
        };
        format!(
            "{}{separator}q={SIZED_QUALITY}&w={width}",
            self.primary_url
        )
    }

    /// Width divided by height, when both are known and height is non-zero.
    pub fn aspect_ratio(&self) -> Option<f64> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if h > 0 => Some(f64::from(w) / f64::from(h)),
            _ => None,
        }
    }

    /// Height that keeps the aspect ratio when shown `width` pixels wide.
    pub fn display_height(&self, width: u32) -> Option<u32> {
        self.aspect_ratio()
            .map(|ratio| (f64::from(width) / ratio).round() as u32)
    }

    /// Short attribution line for the photographer.
    pub fn credit(&self) -> String {
        format!("Photo by {}", self.creator_name)
    }
}
