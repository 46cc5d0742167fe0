use crate::api::{ApiError, RealtyApi};
use crate::forms::image::is_image_data_uri;
use crate::forms::{BlogForm, PropertyForm};
use crate::models::{BlogPost, ImageUpload, ImageUploadResponse, Property};
use crate::session::Session;
use crate::views::sequence::RequestSequence;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminTab {
    #[default]
    Properties,
    Blog,
}

/// Log a failed admin-scoped call and drop the session if the server
/// refused the token.
fn guarded_failure(session: &mut Session, err: &ApiError, action: &str) {
    error!(error = %err, "Error {action}");
    if err.is_auth_failure() {
        session.invalidate();
    }
}

/// State behind the admin panel: listings, posts, and the open form.
#[derive(Debug, Default)]
pub struct AdminPanel {
    tab: AdminTab,
    properties: Vec<Property>,
    posts: Vec<BlogPost>,
    property_form: Option<PropertyForm>,
    blog_form: Option<BlogForm>,
    property_sequence: RequestSequence,
    post_sequence: RequestSequence,
}

impl AdminPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> AdminTab {
        self.tab
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    pub fn property_form(&self) -> Option<&PropertyForm> {
        self.property_form.as_ref()
    }

    pub fn property_form_mut(&mut self) -> Option<&mut PropertyForm> {
        self.property_form.as_mut()
    }

    pub fn blog_form(&self) -> Option<&BlogForm> {
        self.blog_form.as_ref()
    }

    pub fn blog_form_mut(&mut self) -> Option<&mut BlogForm> {
        self.blog_form.as_mut()
    }

    /// Switch tabs and load the tab's list.
    pub async fn select_tab(&mut self, tab: AdminTab, api: &dyn RealtyApi, session: &mut Session) {
        self.tab = tab;
        self.refresh(api, session).await;
    }

    pub async fn refresh(&mut self, api: &dyn RealtyApi, session: &mut Session) {
        match self.tab {
            AdminTab::Properties => self.fetch_properties(api).await,
            AdminTab::Blog => self.fetch_posts(api, session).await,
        }
    }

    async fn fetch_properties(&mut self, api: &dyn RealtyApi) {
        let ticket = self.property_sequence.issue();
        let result = api.list_properties().await;
        if !self.property_sequence.is_current(ticket) {
            debug!(?ticket, "discarding stale admin property response");
            return;
        }
        match result {
            Ok(properties) => self.properties = properties,
            Err(err) => error!(error = %err, "Error fetching properties"),
        }
    }

    async fn fetch_posts(&mut self, api: &dyn RealtyApi, session: &mut Session) {
        let Some(token) = session.token().map(str::to_string) else {
            warn!("admin blog list requested without a session");
            return;
        };

        let ticket = self.post_sequence.issue();
        let result = api.list_all_blog_posts(&token).await;
        if !self.post_sequence.is_current(ticket) {
            debug!(?ticket, "discarding stale admin blog response");
            return;
        }
        match result {
            Ok(posts) => self.posts = posts,
            Err(err) => guarded_failure(session, &err, "fetching blog posts"),
        }
    }

    /// Delete a listing; it leaves the local list only once the server agrees.
    pub async fn delete_property(
        &mut self,
        id: &str,
        api: &dyn RealtyApi,
        session: &mut Session,
    ) -> bool {
        let Some(token) = session.token().map(str::to_string) else {
            warn!(id, "delete requested without a session");
            return false;
        };
        match api.delete_property(&token, id).await {
            Ok(()) => {
                self.properties.retain(|property| property.id != id);
                true
            }
            Err(err) => {
                guarded_failure(session, &err, "deleting property");
                false
            }
        }
    }

    pub async fn delete_post(&mut self, id: &str, api: &dyn RealtyApi, session: &mut Session) -> bool {
        let Some(token) = session.token().map(str::to_string) else {
            warn!(id, "delete requested without a session");
            return false;
        };
        match api.delete_blog_post(&token, id).await {
            Ok(()) => {
                self.posts.retain(|post| post.id != id);
                true
            }
            Err(err) => {
                guarded_failure(session, &err, "deleting blog post");
                false
            }
        }
    }

    /// Open the property form, pre-filled when `id` names a loaded listing.
    pub fn open_property_form(&mut self, id: Option<&str>) -> bool {
        let form = match id {
            None => PropertyForm::new(),
            Some(id) => match self.properties.iter().find(|property| property.id == id) {
                Some(property) => PropertyForm::edit(property),
                None => return false,
            },
        };
        self.property_form = Some(form);
        true
    }

    pub fn close_property_form(&mut self) {
        self.property_form = None;
    }

    pub fn open_blog_form(&mut self, id: Option<&str>) -> bool {
        let form = match id {
            None => BlogForm::new(),
            Some(id) => match self.posts.iter().find(|post| post.id == id) {
                Some(post) => BlogForm::edit(post),
                None => return false,
            },
        };
        self.blog_form = Some(form);
        true
    }

    pub fn close_blog_form(&mut self) {
        self.blog_form = None;
    }

    /// Create or update from the open property form.
    ///
    /// Success closes the form and reloads the listings; any failure leaves
    /// the form open for another attempt.
    pub async fn submit_property_form(&mut self, api: &dyn RealtyApi, session: &mut Session) -> bool {
        let Some(form) = self.property_form.as_mut() else {
            return false;
        };
        let payload = match form.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "property form is incomplete");
                return false;
            }
        };
        let Some(token) = session.token().map(str::to_string) else {
            warn!("property save requested without a session");
            return false;
        };
        let editing = form.editing_id().map(str::to_string);
        form.set_loading(true);

        let result = match editing.as_deref() {
            Some(id) => api.update_property(&token, id, &payload).await,
            None => api.create_property(&token, &payload).await,
        };

        match result {
            Ok(_) => {
                self.property_form = None;
                self.fetch_properties(api).await;
                true
            }
            Err(err) => {
                if let Some(form) = self.property_form.as_mut() {
                    form.set_loading(false);
                }
                guarded_failure(session, &err, "saving property");
                false
            }
        }
    }

    pub async fn submit_blog_form(&mut self, api: &dyn RealtyApi, session: &mut Session) -> bool {
        let Some(form) = self.blog_form.as_mut() else {
            return false;
        };
        let Some(token) = session.token().map(str::to_string) else {
            warn!("blog save requested without a session");
            return false;
        };
        let payload = form.to_payload();
        let editing = form.editing_id().map(str::to_string);
        form.set_loading(true);

        let result = match editing.as_deref() {
            Some(id) => api.update_blog_post(&token, id, &payload).await,
            None => api.create_blog_post(&token, &payload).await,
        };

        match result {
            Ok(_) => {
                self.blog_form = None;
                self.fetch_posts(api, session).await;
                true
            }
            Err(err) => {
                if let Some(form) = self.blog_form.as_mut() {
                    form.set_loading(false);
                }
                guarded_failure(session, &err, "saving blog post");
                false
            }
        }
    }
}

impl AdminPanel {
    /// Send an already-embedded image to the upload endpoint.
    ///
    /// Anything that is not a `data:image` URI is refused locally since the
    /// server would reject it anyway.
    pub async fn upload_image(
        &self,
        filename: &str,
        data_uri: String,
        api: &dyn RealtyApi,
        session: &mut Session,
    ) -> Option<ImageUploadResponse> {
        if !is_image_data_uri(&data_uri) {
            warn!(filename, "not an image, skipping upload");
            return None;
        }
        let Some(token) = session.token().map(str::to_string) else {
            warn!(filename, "upload requested without a session");
            return None;
        };

        let upload = ImageUpload {
            image: data_uri,
            filename: filename.to_string(),
        };
        match api.upload_image(&token, &upload).await {
            Ok(response) => {
                info!(filename, "image uploaded");
                Some(response)
            }
            Err(err) => {
                guarded_failure(session, &err, "uploading image");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;
    use crate::views::fake::{post, property, FakeApi, VALID_TOKEN};

    fn signed_in() -> (Session, MemoryTokenStore) {
        let storage = MemoryTokenStore::with_token(VALID_TOKEN);
        (Session::restore(storage.clone()), storage)
    }

    fn seeded() -> FakeApi {
        FakeApi::with_data(
            vec![
                property("1", "Villa", "Malibu", 2_000_000.0),
                property("2", "Condo", "Miami", 600_000.0),
            ],
            vec![post("10", "Published", true), post("11", "Draft", false)],
        )
    }

    #[tokio::test]
    async fn tabs_load_their_lists() {
        let api = seeded();
        let (mut session, _) = signed_in();
        let mut panel = AdminPanel::new();

        panel.refresh(&api, &mut session).await;
        assert_eq!(panel.properties().len(), 2);
        assert!(panel.posts().is_empty());

        panel.select_tab(AdminTab::Blog, &api, &mut session).await;
        assert_eq!(panel.tab(), AdminTab::Blog);
        assert_eq!(panel.posts().len(), 2, "drafts are included");
    }

    #[tokio::test]
    async fn rejected_token_clears_session() {
        let api = seeded();
        let storage = MemoryTokenStore::with_token("expired");
        let mut session = Session::restore(storage.clone());
        let mut panel = AdminPanel::new();

        panel.select_tab(AdminTab::Blog, &api, &mut session).await;
        assert!(panel.posts().is_empty());
        assert!(!session.is_authenticated());
        assert_eq!(storage.peek(), None);
    }

    #[tokio::test]
    async fn blog_tab_without_session_makes_no_call() {
        let api = seeded();
        let mut session = Session::restore(MemoryTokenStore::new());
        let mut panel = AdminPanel::new();

        panel.select_tab(AdminTab::Blog, &api, &mut session).await;
        assert!(api.calls().is_empty());
        assert!(panel.posts().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_locally_after_success() {
        let api = seeded();
        let (mut session, _) = signed_in();
        let mut panel = AdminPanel::new();
        panel.refresh(&api, &mut session).await;

        assert!(panel.delete_property("1", &api, &mut session).await);
        assert_eq!(panel.properties().len(), 1);

        assert!(!panel.delete_property("404", &api, &mut session).await);
        assert_eq!(panel.properties().len(), 1);
        assert!(session.is_authenticated(), "a 404 keeps the session");
    }

    #[tokio::test]
    async fn create_property_closes_form_and_refetches() {
        let api = seeded();
        let (mut session, _) = signed_in();
        let mut panel = AdminPanel::new();

        assert!(panel.open_property_form(None));
        let form = panel.property_form_mut().unwrap();
        form.title = "Beach House".to_string();
        form.price = "900000".to_string();
        form.area = "2100".to_string();
        form.features = "Ocean View, Deck".to_string();

        assert!(panel.submit_property_form(&api, &mut session).await);
        assert!(panel.property_form().is_none());
        assert_eq!(panel.properties().len(), 3);
        assert_eq!(api.calls(), vec!["create_property", "list_properties"]);
    }

    #[tokio::test]
    async fn edit_property_puts_to_existing_id() {
        let api = seeded();
        let (mut session, _) = signed_in();
        let mut panel = AdminPanel::new();
        panel.refresh(&api, &mut session).await;

        assert!(panel.open_property_form(Some("2")));
        panel.property_form_mut().unwrap().title = "Renovated Condo".to_string();
        assert!(panel.submit_property_form(&api, &mut session).await);

        let stored = api.stored_properties();
        assert_eq!(stored[1].id, "2");
        assert_eq!(stored[1].title, "Renovated Condo");
        assert!(!panel.open_property_form(Some("missing")));
    }

    #[tokio::test]
    async fn invalid_form_stays_open_without_calling_api() {
        let api = seeded();
        let (mut session, _) = signed_in();
        let mut panel = AdminPanel::new();

        panel.open_property_form(None);
        panel.property_form_mut().unwrap().price = "a lot".to_string();
        assert!(!panel.submit_property_form(&api, &mut session).await);
        assert!(panel.property_form().is_some());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_save_leaves_form_open_and_idle() {
        let api = FakeApi::failing(500);
        let (mut session, _) = signed_in();
        let mut panel = AdminPanel::new();

        panel.open_blog_form(None);
        panel.blog_form_mut().unwrap().title = "Market Outlook".to_string();
        assert!(!panel.submit_blog_form(&api, &mut session).await);

        let form = panel.blog_form().unwrap();
        assert!(!form.is_loading());
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn blog_create_refetches_admin_list() {
        let api = seeded();
        let (mut session, _) = signed_in();
        let mut panel = AdminPanel::new();

        panel.open_blog_form(None);
        panel.blog_form_mut().unwrap().title = "Staging Tips".to_string();
        assert!(panel.submit_blog_form(&api, &mut session).await);
        assert!(panel.blog_form().is_none());
        assert_eq!(panel.posts().len(), 3);

        assert!(panel.delete_post("11", &api, &mut session).await);
        assert_eq!(panel.posts().len(), 2);
    }

    #[tokio::test]
    async fn upload_refuses_non_images() {
        let api = seeded();
        let (mut session, _) = signed_in();
        let panel = AdminPanel::new();

        let refused = panel
            .upload_image("notes.txt", "data:text/plain;base64,aGk=".to_string(), &api, &mut session)
            .await;
        assert!(refused.is_none());
        assert!(api.calls().is_empty());

        let uploaded = panel
            .upload_image("front.png", "data:image/png;base64,aGk=".to_string(), &api, &mut session)
            .await
            .unwrap();
        assert_eq!(uploaded.filename, "front.png");
        assert_eq!(uploaded.image_url, "data:image/png;base64,aGk=");
    }
}
