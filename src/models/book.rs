use serde::{Deserialize, Serialize};

/// A catalog volume
///
/// The `id` is the catalog's identifier and is the only field the core relies
/// on for identity. Everything descriptive lives in the optional
/// [`VolumeInfo`] block, which search results occasionally omit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: String,
    #[serde(rename = "volumeInfo", default, skip_serializing_if = "Option::is_none")]
    pub volume_info: Option<VolumeInfo>,
}

impl Book {
    pub fn info(&self) -> Option<&VolumeInfo> {
        self.volume_info.as_ref()
    }

    /// Average rating with the catalog's missing-value convention mapped to 0.
    pub fn average_rating(&self) -> f64 {
        self.info().and_then(|v| v.average_rating).unwrap_or(0.0)
    }

    /// Ratings count with missing mapped to 0.
    pub fn ratings_count(&self) -> u32 {
        self.info().and_then(|v| v.ratings_count).unwrap_or(0)
    }
}

/// Descriptive block of a catalog volume (camelCase on the wire)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub categories: Vec<String>,
    pub description: Option<String>,
    pub industry_identifiers: Vec<IndustryIdentifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_links: Option<ImageLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings_count: Option<u32>,
}

impl VolumeInfo {
    /// True when the catalog supplied a direct cover URL (either size).
    pub fn has_thumbnail(&self) -> bool {
        self.image_links
            .as_ref()
            .map(|links| links.thumbnail.is_some() || links.small_thumbnail.is_some())
            .unwrap_or(false)
    }
}

/// Industry identifier pair, e.g. `{"type": "ISBN_13", "identifier": "978..."}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub identifier_type: String,
    #[serde(rename = "identifier")]
    pub value: String,
}

/// Direct cover URLs supplied by the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_thumbnail: Option<String>,
}
