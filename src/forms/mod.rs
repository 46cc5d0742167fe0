//! In-progress edits for the admin property and blog forms.
//!
//! Fields hold raw user text until submission; [`PropertyForm::to_payload`]
//! is the single place numbers get parsed.

pub mod image;

use crate::models::{
    BlogCategory, BlogPost, BlogPostPayload, Property, PropertyPayload, PropertyStatus,
    PropertyType,
};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("no image at position {index} (form holds {len})")]
    ImageIndex { index: usize, len: usize },

    #[error("failed to read image {}", .path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read an image file and embed it as a data URI.
pub fn read_image(path: &Path) -> Result<String, FormError> {
    let bytes = fs::read(path).map_err(|source| FormError::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "embedding image");
    Ok(image::to_data_uri(&bytes, image::mime_for_path(path)))
}

fn parse_decimal(field: &'static str, value: &str) -> Result<f64, FormError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| FormError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn parse_count(field: &'static str, value: &str) -> Result<u32, FormError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| FormError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Split a comma-separated tag list, dropping blanks.
pub fn split_features(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|feature| !feature.is_empty())
        .map(str::to_string)
        .collect()
}

/// Create/edit state for a property listing
#[derive(Debug, Clone)]
pub struct PropertyForm {
    editing: Option<String>,
    pub title: String,
    pub description: String,
    pub price: String,
    pub location: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub area: String,
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    /// Comma-separated
    pub features: String,
    images: Vec<String>,
    loading: bool,
}

impl Default for PropertyForm {
    fn default() -> Self {
        Self {
            editing: None,
            title: String::new(),
            description: String::new(),
            price: String::new(),
            location: String::new(),
            bedrooms: "1".to_string(),
            bathrooms: "1".to_string(),
            area: String::new(),
            property_type: PropertyType::House,
            status: PropertyStatus::Available,
            features: String::new(),
            images: Vec::new(),
            loading: false,
        }
    }
}

impl PropertyForm {
    /// Blank form for a new listing
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing listing
    pub fn edit(property: &Property) -> Self {
        Self {
            editing: Some(property.id.clone()),
            title: property.title.clone(),
            description: property.description.clone(),
            price: property.price.to_string(),
            location: property.location.clone(),
            bedrooms: property.bedrooms.to_string(),
            bathrooms: property.bathrooms.to_string(),
            area: property.area.to_string(),
            property_type: property.property_type,
            status: property.status,
            features: property.features.join(", "),
            images: property.images.clone(),
            loading: false,
        }
    }

    /// Id of the listing being edited, `None` when creating.
    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn add_image_bytes(&mut self, bytes: &[u8], mime: &str) {
        self.images.push(image::to_data_uri(bytes, mime));
    }

    pub fn add_image_file(&mut self, path: &Path) -> Result<(), FormError> {
        let uri = read_image(path)?;
        self.images.push(uri);
        Ok(())
    }

    pub fn remove_image(&mut self, index: usize) -> Result<String, FormError> {
        if index >= self.images.len() {
            return Err(FormError::ImageIndex {
                index,
                len: self.images.len(),
            });
        }
        Ok(self.images.remove(index))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn to_payload(&self) -> Result<PropertyPayload, FormError> {
        Ok(PropertyPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            price: parse_decimal("price", &self.price)?,
            location: self.location.clone(),
            bedrooms: parse_count("bedrooms", &self.bedrooms)?,
            bathrooms: parse_count("bathrooms", &self.bathrooms)?,
            area: parse_decimal("area", &self.area)?,
            property_type: self.property_type,
            status: self.status,
            features: split_features(&self.features),
            images: self.images.clone(),
        })
    }
}

/// Create/edit state for a blog post
#[derive(Debug, Clone)]
pub struct BlogForm {
    editing: Option<String>,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: BlogCategory,
    pub published: bool,
    image: String,
    loading: bool,
}

impl Default for BlogForm {
    fn default() -> Self {
        Self {
            editing: None,
            title: String::new(),
            content: String::new(),
            excerpt: String::new(),
            category: BlogCategory::Tips,
            published: true,
            image: String::new(),
            loading: false,
        }
    }
}

impl BlogForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(post: &BlogPost) -> Self {
        Self {
            editing: Some(post.id.clone()),
            title: post.title.clone(),
            content: post.content.clone(),
            excerpt: post.excerpt.clone(),
            category: post.category,
            published: post.published,
            image: post.image.clone(),
            loading: false,
        }
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        (!self.image.is_empty()).then_some(self.image.as_str())
    }

    /// Replace the post image.
    pub fn set_image_bytes(&mut self, bytes: &[u8], mime: &str) {
        self.image = image::to_data_uri(bytes, mime);
    }

    pub fn set_image_file(&mut self, path: &Path) -> Result<(), FormError> {
        self.image = read_image(path)?;
        Ok(())
    }

    pub fn clear_image(&mut self) {
        self.image.clear();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn to_payload(&self) -> BlogPostPayload {
        BlogPostPayload {
            title: self.title.clone(),
            content: self.content.clone(),
            excerpt: self.excerpt.clone(),
            category: self.category,
            image: self.image.clone(),
            published: self.published,
        }
    }
}
