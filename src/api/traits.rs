use crate::api::ApiError;
use crate::models::{
    BlogCategory, BlogPost, BlogPostPayload, ImageUpload, ImageUploadResponse, LoginRequest,
    LoginResponse, Property, PropertyPayload,
};
use async_trait::async_trait;

/// Remote operations the site consumes.
///
/// Calls taking a `token` are admin-scoped and send it as a bearer
/// credential. Page controllers depend on this trait rather than on
/// [`ApiClient`](crate::api::ApiClient) so they can run against a fake.
#[async_trait]
pub trait RealtyApi: Send + Sync {
    async fn list_properties(&self) -> Result<Vec<Property>, ApiError>;

    async fn get_property(&self, id: &str) -> Result<Property, ApiError>;

    /// Published posts, optionally restricted to one category.
    async fn list_blog_posts(
        &self,
        category: Option<BlogCategory>,
    ) -> Result<Vec<BlogPost>, ApiError>;

    async fn get_blog_post(&self, id: &str) -> Result<BlogPost, ApiError>;

    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError>;

    /// Every post, drafts included.
    async fn list_all_blog_posts(&self, token: &str) -> Result<Vec<BlogPost>, ApiError>;

    async fn create_property(
        &self,
        token: &str,
        payload: &PropertyPayload,
    ) -> Result<Property, ApiError>;

    async fn update_property(
        &self,
        token: &str,
        id: &str,
        payload: &PropertyPayload,
    ) -> Result<Property, ApiError>;

    async fn delete_property(&self, token: &str, id: &str) -> Result<(), ApiError>;

    async fn create_blog_post(
        &self,
        token: &str,
        payload: &BlogPostPayload,
    ) -> Result<BlogPost, ApiError>;

    async fn update_blog_post(
        &self,
        token: &str,
        id: &str,
        payload: &BlogPostPayload,
    ) -> Result<BlogPost, ApiError>;

    async fn delete_blog_post(&self, token: &str, id: &str) -> Result<(), ApiError>;

    async fn upload_image(
        &self,
        token: &str,
        upload: &ImageUpload,
    ) -> Result<ImageUploadResponse, ApiError>;
}
