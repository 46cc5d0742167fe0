//! In-memory [`RealtyApi`] used by the page controller tests.

use crate::api::{ApiError, RealtyApi};
use crate::models::{
    BlogCategory, BlogPost, BlogPostPayload, ImageUpload, ImageUploadResponse, LoginRequest,
    LoginResponse, Property, PropertyPayload, PropertyStatus, PropertyType,
};
use async_trait::async_trait;
use std::sync::Mutex;

pub const VALID_TOKEN: &str = "valid-token";

#[derive(Debug, Default)]
struct State {
    properties: Vec<Property>,
    posts: Vec<BlogPost>,
    calls: Vec<String>,
    next_id: u32,
}

#[derive(Debug, Default)]
pub struct FakeApi {
    state: Mutex<State>,
    /// Status every call fails with, when set
    pub fail_with: Option<u16>,
    /// Every call answers with a body that is not JSON
    pub garbled: bool,
}

pub fn property(id: &str, title: &str, location: &str, price: f64) -> Property {
    Property {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        price,
        location: location.to_string(),
        bedrooms: 2,
        bathrooms: 1,
        area: 1000.0,
        property_type: PropertyType::House,
        status: PropertyStatus::Available,
        features: vec![],
        images: vec![],
        created_at: None,
        updated_at: None,
    }
}

pub fn post(id: &str, title: &str, published: bool) -> BlogPost {
    BlogPost {
        id: id.to_string(),
        title: title.to_string(),
        excerpt: String::new(),
        content: "First paragraph\nSecond paragraph".to_string(),
        category: BlogCategory::Guides,
        author: "Admin".to_string(),
        published,
        image: String::new(),
        created_at: None,
        updated_at: None,
    }
}

fn rejected(path: &str, status: u16) -> ApiError {
    ApiError::Status {
        url: format!("fake:{path}"),
        status,
        body: String::new(),
    }
}

impl FakeApi {
    pub fn with_data(properties: Vec<Property>, posts: Vec<BlogPost>) -> Self {
        Self {
            state: Mutex::new(State {
                properties,
                posts,
                calls: vec![],
                next_id: 100,
            }),
            fail_with: None,
            garbled: false,
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::default()
        }
    }

    pub fn garbled() -> Self {
        Self {
            garbled: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn stored_properties(&self) -> Vec<Property> {
        self.state.lock().unwrap().properties.clone()
    }

    fn record(&self, call: &str) -> Result<(), ApiError> {
        self.state.lock().unwrap().calls.push(call.to_string());
        if self.garbled {
            return Err(ApiError::Decode {
                url: format!("fake:{call}"),
                source: serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
            });
        }
        match self.fail_with {
            Some(status) => Err(rejected(call, status)),
            None => Ok(()),
        }
    }

    fn guard(&self, call: &str, token: &str) -> Result<(), ApiError> {
        self.record(call)?;
        if token == VALID_TOKEN {
            Ok(())
        } else {
            Err(rejected(call, 401))
        }
    }

    fn next_id(&self) -> String {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        state.next_id.to_string()
    }
}

fn apply_property(id: String, payload: &PropertyPayload) -> Property {
    Property {
        id,
        title: payload.title.clone(),
        description: payload.description.clone(),
        price: payload.price,
        location: payload.location.clone(),
        bedrooms: payload.bedrooms,
        bathrooms: payload.bathrooms,
        area: payload.area,
        property_type: payload.property_type,
        status: payload.status,
        features: payload.features.clone(),
        images: payload.images.clone(),
        created_at: None,
        updated_at: None,
    }
}

fn apply_post(id: String, payload: &BlogPostPayload) -> BlogPost {
    BlogPost {
        id,
        title: payload.title.clone(),
        excerpt: payload.excerpt.clone(),
        content: payload.content.clone(),
        category: payload.category,
        author: "Admin".to_string(),
        published: payload.published,
        image: payload.image.clone(),
        created_at: None,
        updated_at: None,
    }
}

#[async_trait]
impl RealtyApi for FakeApi {
    async fn list_properties(&self) -> Result<Vec<Property>, ApiError> {
        self.record("list_properties")?;
        Ok(self.stored_properties())
    }

    async fn get_property(&self, id: &str) -> Result<Property, ApiError> {
        self.record("get_property")?;
        self.stored_properties()
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| rejected("get_property", 404))
    }

    async fn list_blog_posts(
        &self,
        category: Option<BlogCategory>,
    ) -> Result<Vec<BlogPost>, ApiError> {
        self.record("list_blog_posts")?;
        let state = self.state.lock().unwrap();
        Ok(state
            .posts
            .iter()
            .filter(|p| p.published)
            .filter(|p| category.map_or(true, |c| p.category == c))
            .cloned()
            .collect())
    }

    async fn get_blog_post(&self, id: &str) -> Result<BlogPost, ApiError> {
        self.record("get_blog_post")?;
        let state = self.state.lock().unwrap();
        state
            .posts
            .iter()
            .find(|p| p.id == id && p.published)
            .cloned()
            .ok_or_else(|| rejected("get_blog_post", 404))
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.record("login")?;
        if credentials.username == "admin" && credentials.password == "admin123" {
            Ok(LoginResponse {
                access_token: VALID_TOKEN.to_string(),
                token_type: Some("bearer".to_string()),
            })
        } else {
            Err(rejected("login", 401))
        }
    }

    async fn list_all_blog_posts(&self, token: &str) -> Result<Vec<BlogPost>, ApiError> {
        self.guard("list_all_blog_posts", token)?;
        Ok(self.state.lock().unwrap().posts.clone())
    }

    async fn create_property(
        &self,
        token: &str,
        payload: &PropertyPayload,
    ) -> Result<Property, ApiError> {
        self.guard("create_property", token)?;
        let created = apply_property(self.next_id(), payload);
        self.state.lock().unwrap().properties.push(created.clone());
        Ok(created)
    }

    async fn update_property(
        &self,
        token: &str,
        id: &str,
        payload: &PropertyPayload,
    ) -> Result<Property, ApiError> {
        self.guard("update_property", token)?;
        let updated = apply_property(id.to_string(), payload);
        let mut state = self.state.lock().unwrap();
        let slot = state
            .properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| rejected("update_property", 404))?;
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete_property(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.guard("delete_property", token)?;
        let mut state = self.state.lock().unwrap();
        let before = state.properties.len();
        state.properties.retain(|p| p.id != id);
        if state.properties.len() == before {
            return Err(rejected("delete_property", 404));
        }
        Ok(())
    }

    async fn create_blog_post(
        &self,
        token: &str,
        payload: &BlogPostPayload,
    ) -> Result<BlogPost, ApiError> {
        self.guard("create_blog_post", token)?;
        let created = apply_post(self.next_id(), payload);
        self.state.lock().unwrap().posts.push(created.clone());
        Ok(created)
    }

    async fn update_blog_post(
        &self,
        token: &str,
        id: &str,
        payload: &BlogPostPayload,
    ) -> Result<BlogPost, ApiError> {
        self.guard("update_blog_post", token)?;
        let updated = apply_post(id.to_string(), payload);
        let mut state = self.state.lock().unwrap();
        let slot = state
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| rejected("update_blog_post", 404))?;
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete_blog_post(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.guard("delete_blog_post", token)?;
        let mut state = self.state.lock().unwrap();
        let before = state.posts.len();
        state.posts.retain(|p| p.id != id);
        if state.posts.len() == before {
            return Err(rejected("delete_blog_post", 404));
        }
        Ok(())
    }

    async fn upload_image(
        &self,
        token: &str,
        upload: &ImageUpload,
    ) -> Result<ImageUploadResponse, ApiError> {
        self.guard("upload_image", token)?;
        Ok(ImageUploadResponse {
            image_url: upload.image.clone(),
            filename: upload.filename.clone(),
        })
    }
}
