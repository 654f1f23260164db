//! Response types for the Unsplash `/search/photos` endpoint.
//!
//! Only the fields the app reads are modelled; serde ignores the rest.

use pawpal_core::PhotoRecord;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Total matching photos across all pages.
    pub total: u64,
    #[serde(default)]
    pub results: Vec<PhotoItem>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoItem {
    pub urls: PhotoUrls,
    #[serde(default)]
    pub alt_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub user: PhotoUser,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoUrls {
    /// Base image URL; accepts sizing parameters.
    pub raw: String,
    #[serde(default)]
    pub thumb: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoUser {
    pub name: String,
    pub links: UserLinks,
}

#[derive(Debug, Deserialize)]
pub struct UserLinks {
    /// The photographer's profile page.
    pub html: String,
}

impl From<PhotoItem> for PhotoRecord {
    fn from(item: PhotoItem) -> Self {
        let alt_text = item
            .alt_description
            .or(item.description)
            .unwrap_or_default();

        let mut photo =
            PhotoRecord::new(item.urls.raw, alt_text, item.user.name, item.user.links.html);
        if let Some(thumb) = item.urls.thumb {
            photo = photo.with_thumbnail(thumb);
        }
        if let (Some(width), Some(height)) = (item.width, item.height) {
            photo = photo.with_dimensions(width, height);
        }
        photo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: &str = r#"{
        "id": "abc",
        "width": 3456,
        "height": 5184,
        "description": "Long description",
        "alt_description": "brown dog on grass",
        "urls": {
            "raw": "https://images.unsplash.com/photo-1?ixid=x",
            "full": "https://images.unsplash.com/photo-1?q=85",
            "small": "https://images.unsplash.com/photo-1?w=400",
            "thumb": "https://images.unsplash.com/photo-1?w=200"
        },
        "user": {
            "name": "Jane Doe",
            "username": "jane",
            "links": { "html": "https://unsplash.com/@jane" }
        }
    }"#;

    #[test]
    fn item_maps_to_photo_record() {
        let item: PhotoItem = serde_json::from_str(ITEM).expect("valid item");
        let photo = PhotoRecord::from(item);

        assert_eq!(photo.primary_url(), "https://images.unsplash.com/photo-1?ixid=x");
        assert_eq!(
            photo.thumbnail_url(),
            Some("https://images.unsplash.com/photo-1?w=200")
        );
        assert_eq!(photo.alt_text(), "brown dog on grass");
        assert_eq!(photo.creator_name(), "Jane Doe");
        assert_eq!(photo.creator_url(), "https://unsplash.com/@jane");
        assert_eq!(photo.width(), Some(3456));
        assert_eq!(photo.height(), Some(5184));
    }

    #[test]
    fn alt_text_falls_back_to_description_then_empty() {
        let mut value: serde_json::Value = serde_json::from_str(ITEM).unwrap();
        value["alt_description"] = serde_json::Value::Null;
        let photo = PhotoRecord::from(serde_json::from_value::<PhotoItem>(value.clone()).unwrap());
        assert_eq!(photo.alt_text(), "Long description");

        value["description"] = serde_json::Value::Null;
        let photo = PhotoRecord::from(serde_json::from_value::<PhotoItem>(value).unwrap());
        assert_eq!(photo.alt_text(), "");
    }
}
