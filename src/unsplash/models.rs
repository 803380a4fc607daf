//! Records returned by the Unsplash search API
//!
//! Only the fields the gallery renders are modelled; everything else in the
//! response is ignored by serde.

use serde::Deserialize;

/// Title shown when a photo has no alt description
pub const UNTITLED: &str = "Sem título";
/// File stem used when a download has no better name
pub const DEFAULT_FILE_STEM: &str = "imagem";

/// Body of `GET /search/photos`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u64,
    pub results: Vec<Photo>,
}

/// Body of a failed request, e.g. `{"errors": ["OAuth error: The access token is invalid"]}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub errors: Vec<String>,
}

/// A single photo from a search result
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Photo {
    pub id: String,
    pub urls: PhotoUrls,
    #[serde(default)]
    pub alt_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub user: User,
    #[serde(default)]
    pub likes: u64,
    /// Not present in search results for most API tiers
    #[serde(default)]
    pub downloads: Option<u64>,
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhotoUrls {
    /// 1080px wide rendition
    pub regular: String,
    /// Original resolution
    pub full: String,
    /// 400px wide rendition
    #[serde(default)]
    pub small: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    #[serde(default)]
    pub name: String,
    pub username: String,
    pub profile_image: ProfileImage,
    pub links: UserLinks,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileImage {
    pub medium: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserLinks {
    /// Public profile page
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tag {
    pub title: String,
}

impl Photo {
    /// Caption for tiles and the preview header
    pub fn title(&self) -> &str {
        self.alt_description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(UNTITLED)
    }

    /// URL used for grid thumbnails (smallest rendition available)
    pub fn thumbnail_url(&self) -> &str {
        self.urls.small.as_deref().unwrap_or(&self.urls.regular)
    }

    /// Suggested file stem for a download: alt description, else the photo id
    pub fn download_stem(&self) -> &str {
        self.alt_description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(&self.id)
    }

    /// Download counter, or "N/A" when the API did not report one
    pub fn downloads_label(&self) -> String {
        match self.downloads {
            Some(count) if count > 0 => count.to_string(),
            _ => "N/A".to_string(),
        }
    }

    /// Tag labels in API order (empty when the photo has none)
    pub fn tag_titles(&self) -> Vec<&str> {
        self.tags
            .iter()
            .flatten()
            .map(|tag| tag.title.as_str())
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build a photo with only the fields tests care about
    pub fn photo(id: &str, alt: Option<&str>) -> Photo {
        Photo {
            id: id.to_string(),
            urls: PhotoUrls {
                regular: format!("https://images.example/{}?w=1080", id),
                full: format!("https://images.example/{}", id),
                small: Some(format!("https://images.example/{}?w=400", id)),
            },
            alt_description: alt.map(str::to_string),
            description: None,
            user: User {
                name: "Ana Souza".to_string(),
                username: "anasouza".to_string(),
                profile_image: ProfileImage {
                    medium: "https://images.example/ana.jpg".to_string(),
                },
                links: UserLinks {
                    html: "https://unsplash.com/@anasouza".to_string(),
                },
            },
            likes: 10,
            downloads: None,
            tags: None,
        }
    }
}
