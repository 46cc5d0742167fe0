use serde::{Deserialize, Serialize};

/// Constraints used to narrow the property catalog
///
/// Every field is optional and an empty string counts as unset. Price bounds
/// are kept as the raw text the user typed; a bound that does not parse as a
/// finite number imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Matched against title, description and location
    pub search: Option<String>,
    /// Substring of the property type (`"apart"` matches apartments)
    pub property_type: Option<String>,
    pub location: Option<String>,
    /// Inclusive lower bound on price
    pub min_price: Option<String>,
    /// Inclusive upper bound on price
    pub max_price: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_min_price(mut self, min_price: impl Into<String>) -> Self {
        self.min_price = Some(min_price.into());
        self
    }

    pub fn with_max_price(mut self, max_price: impl Into<String>) -> Self {
        self.max_price = Some(max_price.into());
        self
    }

    /// True when no field constrains the catalog.
    pub fn is_empty(&self) -> bool {
        text_term(&self.search).is_none()
            && text_term(&self.property_type).is_none()
            && text_term(&self.location).is_none()
            && price_bound(&self.min_price).is_none()
            && price_bound(&self.max_price).is_none()
    }
}

/// Lowercased needle for a text criterion, or `None` when unset.
pub(crate) fn text_term(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

/// Numeric bound, or `None` when unset or malformed.
pub(crate) fn price_bound(field: &Option<String>) -> Option<f64> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|bound| bound.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_bounds_are_absent() {
        assert_eq!(price_bound(&None), None);
        assert_eq!(price_bound(&Some(String::new())), None);
        assert_eq!(price_bound(&Some("cheap".to_string())), None);
        assert_eq!(price_bound(&Some("NaN".to_string())), None);
        assert_eq!(price_bound(&Some(" 150000 ".to_string())), Some(150000.0));
    }

    #[test]
    fn empty_text_fields_do_not_count() {
        let criteria = FilterCriteria::new()
            .with_search("")
            .with_min_price("abc");
        assert!(criteria.is_empty());
        assert!(!criteria.with_location("Denver").is_empty());
    }
}
