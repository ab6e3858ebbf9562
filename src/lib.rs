//! Plot search: filtered retrieval of land-plot listings from a remote
//! store, with grid/map view state for the search page.

pub mod config;
pub mod controller;
pub mod models;
pub mod store;

pub use controller::{ListingController, ListingState, LoadOutcome, UiEvent, ViewMode};
pub use models::{Council, District, Listing, ListingStatus, Region, UsageType};
pub use store::{FilterCriteria, ListingQuery, ListingStore, MemoryStore, PostgrestStore, StoreError};
