use crate::api::{ApiClient, RealtyApi};
use crate::config::AppConfig;
use crate::render;
use crate::router::{Router, View};
use crate::session::{FileTokenStore, Session, TokenStore};
use anyhow::Result;
use tracing::info;

/// Everything a page needs, owned in one place and handed out explicitly.
pub struct App {
    pub config: AppConfig,
    pub session: Session,
    pub router: Router,
    api: Box<dyn RealtyApi>,
}

impl App {
    /// Build the app from configuration, restoring any saved session.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let api = ApiClient::from_config(&config.api)?;
        let store = FileTokenStore::new(config.storage.token_path.clone());
        info!(api = %api.base_url(), "starting Kimia RealEstate client");
        Ok(Self::with_parts(config, api, store))
    }

    pub fn with_parts(
        config: AppConfig,
        api: impl RealtyApi + 'static,
        store: impl TokenStore + 'static,
    ) -> Self {
        Self {
            config,
            session: Session::restore(store),
            router: Router::new(),
            api: Box::new(api),
        }
    }

    pub fn api(&self) -> &dyn RealtyApi {
        self.api.as_ref()
    }

    /// Borrow the API and the session together, as page controllers need both.
    pub fn parts(&mut self) -> (&dyn RealtyApi, &mut Session) {
        (self.api.as_ref(), &mut self.session)
    }

    pub fn navigate(&mut self, view: View) {
        self.router.navigate(view);
    }

    pub fn navbar(&self) -> String {
        render::navbar(self.router.current(), self.session.is_authenticated())
    }
}
