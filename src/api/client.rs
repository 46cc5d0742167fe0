use crate::api::traits::RealtyApi;
use crate::api::ApiError;
use crate::config::ApiConfig;
use crate::models::{
    BlogCategory, BlogPost, BlogPostPayload, ImageUpload, ImageUploadResponse, LoginRequest,
    LoginResponse, Property, PropertyPayload,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// HTTP implementation of [`RealtyApi`]
///
/// Thin request wrappers: no retries, no caching. Every failure is returned
/// to the caller as an [`ApiError`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` with the default 30 second timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("kimia-realty/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::with_timeout(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send `request` and return the body of a successful response.
    async fn execute(&self, request: RequestBuilder, url: &str) -> Result<String, ApiError> {
        debug!(url, "sending request");

        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            warn!(url, status = status.as_u16(), "request rejected");
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        debug!(url, bytes = body.len(), "response received");
        Ok(body)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: String,
    ) -> Result<T, ApiError> {
        let body = self.execute(request, &url).await?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode { url, source })
    }
}

#[async_trait]
impl RealtyApi for ApiClient {
    async fn list_properties(&self) -> Result<Vec<Property>, ApiError> {
        let url = self.url("/api/properties");
        let properties: Vec<Property> = self.fetch(self.client.get(&url), url).await?;
        info!(count = properties.len(), "fetched properties");
        Ok(properties)
    }

    async fn get_property(&self, id: &str) -> Result<Property, ApiError> {
        let url = self.url(&format!("/api/properties/{id}"));
        self.fetch(self.client.get(&url), url).await
    }

    async fn list_blog_posts(
        &self,
        category: Option<BlogCategory>,
    ) -> Result<Vec<BlogPost>, ApiError> {
        let url = self.url("/api/blog");
        let mut request = self.client.get(&url);
        if let Some(category) = category {
            request = request.query(&[("category", category.as_str())]);
        }
        let posts: Vec<BlogPost> = self.fetch(request, url).await?;
        info!(count = posts.len(), "fetched blog posts");
        Ok(posts)
    }

    async fn get_blog_post(&self, id: &str) -> Result<BlogPost, ApiError> {
        let url = self.url(&format!("/api/blog/{id}"));
        self.fetch(self.client.get(&url), url).await
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let url = self.url("/api/admin/login");
        info!(username = %credentials.username, "requesting admin token");
        self.fetch(self.client.post(&url).json(credentials), url).await
    }

    async fn list_all_blog_posts(&self, token: &str) -> Result<Vec<BlogPost>, ApiError> {
        let url = self.url("/api/admin/blog");
        let posts: Vec<BlogPost> = self
            .fetch(self.client.get(&url).bearer_auth(token), url)
            .await?;
        info!(count = posts.len(), "fetched all blog posts");
        Ok(posts)
    }

    async fn create_property(
        &self,
        token: &str,
        payload: &PropertyPayload,
    ) -> Result<Property, ApiError> {
        let url = self.url("/api/admin/properties");
        let request = self.client.post(&url).bearer_auth(token).json(payload);
        let created: Property = self.fetch(request, url).await?;
        info!(id = %created.id, "created property");
        Ok(created)
    }

    async fn update_property(
        &self,
        token: &str,
        id: &str,
        payload: &PropertyPayload,
    ) -> Result<Property, ApiError> {
        let url = self.url(&format!("/api/admin/properties/{id}"));
        let request = self.client.put(&url).bearer_auth(token).json(payload);
        let updated: Property = self.fetch(request, url).await?;
        info!(id, "updated property");
        Ok(updated)
    }

    async fn delete_property(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/admin/properties/{id}"));
        self.execute(self.client.delete(&url).bearer_auth(token), &url)
            .await?;
        info!(id, "deleted property");
        Ok(())
    }

    async fn create_blog_post(
        &self,
        token: &str,
        payload: &BlogPostPayload,
    ) -> Result<BlogPost, ApiError> {
        let url = self.url("/api/admin/blog");
        let request = self.client.post(&url).bearer_auth(token).json(payload);
        let created: BlogPost = self.fetch(request, url).await?;
        info!(id = %created.id, "created blog post");
        Ok(created)
    }

    async fn update_blog_post(
        &self,
        token: &str,
        id: &str,
        payload: &BlogPostPayload,
    ) -> Result<BlogPost, ApiError> {
        let url = self.url(&format!("/api/admin/blog/{id}"));
        let request = self.client.put(&url).bearer_auth(token).json(payload);
        let updated: BlogPost = self.fetch(request, url).await?;
        info!(id, "updated blog post");
        Ok(updated)
    }

    async fn delete_blog_post(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/admin/blog/{id}"));
        self.execute(self.client.delete(&url).bearer_auth(token), &url)
            .await?;
        info!(id, "deleted blog post");
        Ok(())
    }

    async fn upload_image(
        &self,
        token: &str,
        upload: &ImageUpload,
    ) -> Result<ImageUploadResponse, ApiError> {
        let url = self.url("/api/admin/upload-image");
        let request = self.client.post(&url).bearer_auth(token).json(upload);
        self.fetch(request, url).await
    }
}
