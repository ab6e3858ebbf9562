use crate::models::UsageType;
use serde::de::{Deserializer, IntoDeserializer};
use serde::{Deserialize, Serialize};

/// Upper price bound meaning "no ceiling"
pub const NO_PRICE_CEILING: f64 = 10_000_000.0;
/// Upper area bound (square meters) meaning "no ceiling"
pub const NO_AREA_CEILING: f64 = 10_000.0;

/// Filter parameters for the plot search, as emitted by the filter panel.
///
/// Bounds are inclusive. A minimum of 0 or a maximum at its ceiling means
/// the bound is unconstrained and is left out of the query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Free text matched against title and description
    pub search: String,
    pub min_price: f64,
    pub max_price: f64,
    /// Minimum size in square meters
    pub min_area: f64,
    /// Maximum size in square meters
    pub max_area: f64,
    #[serde(deserialize_with = "empty_as_none")]
    pub council_id: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub usage_type: Option<UsageType>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            min_price: 0.0,
            max_price: NO_PRICE_CEILING,
            min_area: 0.0,
            max_area: NO_AREA_CEILING,
            council_id: None,
            usage_type: None,
        }
    }
}

impl FilterCriteria {
    /// Trimmed search term, or `None` when there is nothing to match
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }

    /// Trimmed council id, or `None` when no council was chosen
    pub fn council(&self) -> Option<&str> {
        self.council_id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    pub fn min_price_bound(&self) -> Option<f64> {
        (self.min_price > 0.0).then_some(self.min_price)
    }

    pub fn max_price_bound(&self) -> Option<f64> {
        (self.max_price < NO_PRICE_CEILING).then_some(self.max_price)
    }

    pub fn min_area_bound(&self) -> Option<f64> {
        (self.min_area > 0.0).then_some(self.min_area)
    }

    pub fn max_area_bound(&self) -> Option<f64> {
        (self.max_area < NO_AREA_CEILING).then_some(self.max_area)
    }
}

/// The filter panel sends "" for untouched select boxes
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.trim().is_empty() => {
            T::deserialize(value.into_deserializer()).map(Some)
        }
        _ => Ok(None),
    }
}
