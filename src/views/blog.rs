use crate::api::{ApiError, RealtyApi};
use crate::models::{BlogCategory, BlogPost};
use crate::views::sequence::{RequestSequence, Ticket};
use tracing::{debug, error};

/// State behind the public blog page
#[derive(Debug, Default)]
pub struct BlogPage {
    posts: Vec<BlogPost>,
    category: Option<BlogCategory>,
    selected: Option<BlogPost>,
    loading: bool,
    sequence: RequestSequence,
}

impl BlogPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    pub fn category(&self) -> Option<BlogCategory> {
        self.category
    }

    /// Takes effect on the next refresh.
    pub fn set_category(&mut self, category: Option<BlogCategory>) {
        self.category = category;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selected(&self) -> Option<&BlogPost> {
        self.selected.as_ref()
    }

    pub fn select(&mut self, id: &str) -> bool {
        self.selected = self.posts.iter().find(|post| post.id == id).cloned();
        self.selected.is_some()
    }

    /// Like [`BlogPage::select`], falling back to a server lookup.
    pub async fn open(&mut self, id: &str, api: &dyn RealtyApi) -> Result<bool, ApiError> {
        if self.select(id) {
            return Ok(true);
        }
        match api.get_blog_post(id).await {
            Ok(post) => {
                self.selected = Some(post);
                Ok(true)
            }
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    pub fn back(&mut self) {
        self.selected = None;
    }

    pub fn begin_fetch(&mut self) -> Ticket {
        self.loading = true;
        self.sequence.issue()
    }

    pub fn apply_fetch(&mut self, ticket: Ticket, result: Result<Vec<BlogPost>, ApiError>) -> bool {
        if !self.sequence.is_current(ticket) {
            debug!(?ticket, "discarding stale blog response");
            return false;
        }

        self.loading = false;
        match result {
            Ok(posts) => self.posts = posts,
            Err(err) => error!(error = %err, "Error fetching blog posts"),
        }
        true
    }

    pub async fn refresh(&mut self, api: &dyn RealtyApi) {
        let ticket = self.begin_fetch();
        let result = api.list_blog_posts(self.category).await;
        self.apply_fetch(ticket, result);
    }
}
