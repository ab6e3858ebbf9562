use crate::models::Listing;
use crate::store::types::FilterCriteria;
use serde::{Deserialize, Serialize};

/// How the result set is presented
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    Map,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::Map,
            ViewMode::Map => ViewMode::Grid,
        }
    }
}

/// Everything the presentation layer renders from
#[derive(Debug, Clone, PartialEq)]
pub struct ListingState {
    /// Newest first, exactly as the last applied fetch returned them
    pub listings: Vec<Listing>,
    pub is_loading: bool,
    pub view_mode: ViewMode,
    pub selected: Option<Listing>,
    /// Filters of the most recently requested load
    pub filters: Option<FilterCriteria>,
}

impl Default for ListingState {
    /// The page starts out loading: mounting triggers an unfiltered fetch
    fn default() -> Self {
        Self {
            listings: Vec::new(),
            is_loading: true,
            view_mode: ViewMode::Grid,
            selected: None,
            filters: None,
        }
    }
}

/// What happened to the response of one `load_listings` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result replaced the published listings
    Applied { count: usize },
    /// A newer load was requested while this one was in flight, so its
    /// response was dropped. `failed` is set when that response was an error.
    Superseded { failed: bool },
}
