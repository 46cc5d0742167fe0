pub mod filter;
pub mod types;

pub use filter::filter;
pub use types::FilterCriteria;

use crate::models::Property;

/// Source listings plus the criteria applied to them.
///
/// The visible list is derived eagerly: every mutator recomputes it before
/// returning, so readers never observe a stale subset.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    source: Vec<Property>,
    criteria: FilterCriteria,
    visible: Vec<Property>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> &[Property] {
        &self.source
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn visible(&self) -> &[Property] {
        &self.visible
    }

    pub fn find(&self, id: &str) -> Option<&Property> {
        self.source.iter().find(|property| property.id == id)
    }

    pub fn set_properties(&mut self, properties: Vec<Property>) {
        self.source = properties;
        self.recompute();
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    pub fn set_search(&mut self, search: Option<String>) {
        self.criteria.search = search;
        self.recompute();
    }

    pub fn set_property_type(&mut self, property_type: Option<String>) {
        self.criteria.property_type = property_type;
        self.recompute();
    }

    pub fn set_location(&mut self, location: Option<String>) {
        self.criteria.location = location;
        self.recompute();
    }

    pub fn set_price_range(&mut self, min_price: Option<String>, max_price: Option<String>) {
        self.criteria.min_price = min_price;
        self.criteria.max_price = max_price;
        self.recompute();
    }

    pub fn clear_criteria(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    fn recompute(&mut self) {
        self.visible = filter(&self.source, &self.criteria);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PropertyStatus, PropertyType};

    fn listing(id: &str, location: &str, price: f64) -> Property {
        Property {
            id: id.to_string(),
            title: format!("Listing {id}"),
            description: String::new(),
            price,
            location: location.to_string(),
            bedrooms: 3,
            bathrooms: 2,
            area: 1800.0,
            property_type: PropertyType::Condo,
            status: PropertyStatus::Available,
            features: vec![],
            images: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn visible_tracks_source_and_criteria() {
        let mut catalog = Catalog::new();
        catalog.set_location(Some("boston".to_string()));
        assert!(catalog.visible().is_empty());

        catalog.set_properties(vec![
            listing("1", "Boston, MA", 500_000.0),
            listing("2", "Austin, TX", 400_000.0),
        ]);
        assert_eq!(catalog.visible().len(), 1);
        assert_eq!(catalog.visible()[0].id, "1");

        catalog.set_price_range(Some("600000".to_string()), None);
        assert!(catalog.visible().is_empty());

        catalog.clear_criteria();
        assert_eq!(catalog.visible().len(), 2);
        assert_eq!(catalog.source().len(), 2);
    }

    #[test]
    fn find_looks_at_source_not_visible() {
        let mut catalog = Catalog::new();
        catalog.set_properties(vec![listing("9", "Reno", 1.0)]);
        catalog.set_search(Some("nothing matches".to_string()));
        assert!(catalog.visible().is_empty());
        assert!(catalog.find("9").is_some());
    }
}
