use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of dwelling a listing describes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    #[default]
    House,
    Apartment,
    Condo,
    Villa,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Apartment => "apartment",
            Self::Condo => "condo",
            Self::Villa => "villa",
        }
    }
}

/// Market status of a listing
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    #[default]
    Available,
    Sold,
    Rented,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Sold => "sold",
            Self::Rented => "rented",
        }
    }
}

/// Blog section a post is filed under
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BlogCategory {
    #[default]
    Tips,
    MarketUpdates,
    Guides,
}

impl BlogCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tips => "tips",
            Self::MarketUpdates => "market-updates",
            Self::Guides => "guides",
        }
    }
}

/// Returned when a string names none of an enum's variants
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! text_enum {
    ($ty:ty, $kind:literal, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                [$($variant),+]
                    .into_iter()
                    .find(|v: &$ty| v.as_str() == wanted)
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

text_enum!(PropertyType, "property type", [PropertyType::House, PropertyType::Apartment, PropertyType::Condo, PropertyType::Villa]);
text_enum!(PropertyStatus, "property status", [PropertyStatus::Available, PropertyStatus::Sold, PropertyStatus::Rented]);
text_enum!(BlogCategory, "blog category", [BlogCategory::Tips, BlogCategory::MarketUpdates, BlogCategory::Guides]);

/// Core property data model
///
/// Text fields the API may omit decode as empty strings so that catalog
/// filtering never has to special-case them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    /// Square feet
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub property_type: PropertyType,
    #[serde(default)]
    pub status: PropertyStatus,
    #[serde(default)]
    pub features: Vec<String>,
    /// Data URIs or remote URLs
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A content-marketing article
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: BlogCategory,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default = "default_published")]
    pub published: bool,
    /// Empty when the post has no image
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BlogPost {
    pub fn image(&self) -> Option<&str> {
        if self.image.is_empty() {
            None
        } else {
            Some(&self.image)
        }
    }
}

fn default_author() -> String {
    "Admin".to_string()
}

fn default_published() -> bool {
    true
}

/// Body of a property create or update call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyPayload {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area: f64,
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    pub features: Vec<String>,
    pub images: Vec<String>,
}

/// Body of a blog post create or update call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogPostPayload {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: BlogCategory,
    pub image: String,
    pub published: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUpload {
    /// Must be a `data:image/...` URI
    pub image: String,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    pub image_url: String,
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn property_tolerates_missing_optional_fields() {
        let property: Property = serde_json::from_value(json!({
            "id": "7",
            "title": "Bare Listing",
            "price": 1000.0
        }))
        .unwrap();

        assert_eq!(property.description, "");
        assert_eq!(property.location, "");
        assert_eq!(property.property_type, PropertyType::House);
        assert_eq!(property.status, PropertyStatus::Available);
        assert!(property.images.is_empty());
    }

    #[test]
    fn blog_post_decodes_server_shape() {
        let post: BlogPost = serde_json::from_value(json!({
            "id": "1",
            "title": "First-Time Home Buyer's Guide",
            "content": "Line one\nLine two",
            "excerpt": "Everything you need to know",
            "category": "market-updates",
            "published": false,
            "image": "",
            "created_at": "2024-01-15T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(post.category, BlogCategory::MarketUpdates);
        assert_eq!(post.author, "Admin");
        assert!(!post.published);
        assert_eq!(post.image(), None);
        assert!(post.created_at.is_some());
    }

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!("Villa".parse::<PropertyType>().unwrap(), PropertyType::Villa);
        assert_eq!("RENTED".parse::<PropertyStatus>().unwrap(), PropertyStatus::Rented);
        assert_eq!(
            "market-updates".parse::<BlogCategory>().unwrap(),
            BlogCategory::MarketUpdates
        );
        let err = "castle".parse::<PropertyType>().unwrap_err();
        assert_eq!(err.kind, "property type");
    }
}
