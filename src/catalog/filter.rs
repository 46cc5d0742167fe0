use crate::catalog::types::{price_bound, text_term, FilterCriteria};
use crate::models::Property;

/// Compute the visible subset of `properties` for `criteria`.
///
/// Every active criterion must hold. Text criteria are case-insensitive
/// substring matches and survivors keep their input order.
pub fn filter(properties: &[Property], criteria: &FilterCriteria) -> Vec<Property> {
    let matcher = Matcher::new(criteria);
    properties
        .iter()
        .filter(|property| matcher.matches(property))
        .cloned()
        .collect()
}

/// Criteria normalized once so matching a long list does not re-lowercase
/// the needles per element.
struct Matcher {
    search: Option<String>,
    property_type: Option<String>,
    location: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
}

impl Matcher {
    fn new(criteria: &FilterCriteria) -> Self {
        Self {
            search: text_term(&criteria.search),
            property_type: text_term(&criteria.property_type),
            location: text_term(&criteria.location),
            min_price: price_bound(&criteria.min_price),
            max_price: price_bound(&criteria.max_price),
        }
    }

    fn matches(&self, property: &Property) -> bool {
        if let Some(needle) = &self.search {
            let hit = contains(&property.title, needle)
                || contains(&property.description, needle)
                || contains(&property.location, needle);
            if !hit {
                return false;
            }
        }

        if let Some(needle) = &self.property_type {
            if !contains(property.property_type.as_str(), needle) {
                return false;
            }
        }

        if let Some(needle) = &self.location {
            if !contains(&property.location, needle) {
                return false;
            }
        }

        if let Some(min) = self.min_price {
            if property.price < min {
                return false;
            }
        }

        if let Some(max) = self.max_price {
            if property.price > max {
                return false;
            }
        }

        true
    }
}

fn contains(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}
