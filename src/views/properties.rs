use crate::api::{ApiError, RealtyApi};
use crate::catalog::{Catalog, FilterCriteria};
use crate::models::Property;
use crate::views::sequence::{RequestSequence, Ticket};
use tracing::{debug, error};

/// State behind the public property catalog page
#[derive(Debug, Default)]
pub struct PropertiesPage {
    catalog: Catalog,
    selected: Option<Property>,
    loading: bool,
    sequence: RequestSequence,
}

impl PropertiesPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Criteria edits go through the catalog so the visible list stays in step.
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.catalog.set_criteria(criteria);
    }

    pub fn visible(&self) -> &[Property] {
        self.catalog.visible()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selected(&self) -> Option<&Property> {
        self.selected.as_ref()
    }

    /// Open the detail view for `id`. Returns false when it is not loaded.
    pub fn select(&mut self, id: &str) -> bool {
        self.selected = self.catalog.find(id).cloned();
        self.selected.is_some()
    }

    /// Open the detail view, asking the server when `id` is not in the
    /// loaded catalog.
    ///
    /// `Ok(false)` means the server has no such listing; other failures are
    /// returned as they are.
    pub async fn open(&mut self, id: &str, api: &dyn RealtyApi) -> Result<bool, ApiError> {
        if self.select(id) {
            return Ok(true);
        }
        match api.get_property(id).await {
            Ok(property) => {
                self.selected = Some(property);
                Ok(true)
            }
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Leave the detail view.
    pub fn back(&mut self) {
        self.selected = None;
    }

    pub fn begin_fetch(&mut self) -> Ticket {
        self.loading = true;
        self.sequence.issue()
    }

    /// Apply a fetch result if `ticket` is still the latest request.
    ///
    /// On failure the previously loaded listings stay in place. Returns
    /// whether the result was applied.
    pub fn apply_fetch(&mut self, ticket: Ticket, result: Result<Vec<Property>, ApiError>) -> bool {
        if !self.sequence.is_current(ticket) {
            debug!(?ticket, "discarding stale property response");
            return false;
        }

        self.loading = false;
        match result {
            Ok(properties) => self.catalog.set_properties(properties),
            Err(err) => error!(error = %err, "Error fetching properties"),
        }
        true
    }

    pub async fn refresh(&mut self, api: &dyn RealtyApi) {
        let ticket = self.begin_fetch();
        let result = api.list_properties().await;
        self.apply_fetch(ticket, result);
    }
}
