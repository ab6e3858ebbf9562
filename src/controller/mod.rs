pub mod events;
pub mod state;

pub use events::UiEvent;
pub use state::{ListingState, LoadOutcome, ViewMode};

use crate::models::Listing;
use crate::store::{FilterCriteria, ListingQuery, ListingStore, StoreError};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Holds the search page state and runs filtered plot queries against an
/// injected [`ListingStore`].
///
/// State is published through a `watch` channel; presentation layers
/// either [`subscribe`](Self::subscribe) or take a [`snapshot`](Self::snapshot).
/// Every load is tagged with a sequence number and only the most recently
/// requested load may touch the published listings.
pub struct ListingController<S> {
    store: S,
    state: watch::Sender<ListingState>,
    latest_request: AtomicU64,
}

impl<S: ListingStore> ListingController<S> {
    pub fn new(store: S) -> Self {
        let (state, _) = watch::channel(ListingState::default());

        Self {
            store,
            state,
            latest_request: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ListingState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ListingState {
        self.state.borrow().clone()
    }

    /// Initial unfiltered fetch when the page is first shown
    pub async fn mount(&self) -> Result<LoadOutcome, StoreError> {
        info!("Mounting plot search with {} store", self.store.store_name());
        self.load_listings(None).await
    }

    /// Fetch available plots matching `filters` and publish them.
    ///
    /// `is_loading` is set before the request and cleared when the latest
    /// request completes, whether it succeeded or not. On failure the
    /// previous listings stay published and the error is returned.
    ///
    /// Responses are not applied in completion order: a response that
    /// arrives after a newer load was issued is dropped, even if it is the
    /// last one to resolve.
    pub async fn load_listings(
        &self,
        filters: Option<FilterCriteria>,
    ) -> Result<LoadOutcome, StoreError> {
        let request = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        let query = ListingQuery::from_filters(filters.as_ref());

        self.state.send_modify(|state| {
            state.is_loading = true;
            state.filters = filters;
        });

        debug!("Load #{} issued with {} predicates", request, query.predicates().len());

        let result = self.store.fetch_listings(&query).await;

        let mut outcome = LoadOutcome::Superseded { failed: false };
        let mut failure = None;

        self.state.send_if_modified(|state| {
            if self.latest_request.load(Ordering::SeqCst) != request {
                if let Err(e) = &result {
                    warn!("Load #{} failed after being superseded: {}", request, e);
                    outcome = LoadOutcome::Superseded { failed: true };
                }
                return false;
            }

            state.is_loading = false;
            match result {
                Ok(listings) => {
                    outcome = LoadOutcome::Applied { count: listings.len() };
                    state.listings = listings;
                }
                Err(e) => failure = Some(e),
            }
            true
        });

        if let Some(e) = failure {
            let kept = self.state.borrow().listings.len();
            warn!("Load #{} failed, keeping {} previous plots: {}", request, kept, e);
            return Err(e);
        }

        match outcome {
            LoadOutcome::Applied { count } => info!("Load #{} returned {} plots", request, count),
            LoadOutcome::Superseded { .. } => debug!("Load #{} superseded by a newer request, response dropped", request),
        }

        Ok(outcome)
    }

    /// Re-run the most recently requested filters
    pub async fn refresh(&self) -> Result<LoadOutcome, StoreError> {
        let filters = self.state.borrow().filters.clone();
        self.load_listings(filters).await
    }

    pub fn set_view_mode(&self, mode: ViewMode) {
        self.state.send_if_modified(|state| {
            let changed = state.view_mode != mode;
            state.view_mode = mode;
            changed
        });
    }

    pub fn toggle_view_mode(&self) -> ViewMode {
        let mut mode = ViewMode::default();
        self.state.send_modify(|state| {
            state.view_mode = state.view_mode.toggled();
            mode = state.view_mode;
        });
        mode
    }

    /// Remember the plot the user is inspecting. Does not fetch anything.
    pub fn select_listing(&self, listing: Listing) {
        debug!("Selected plot {}", listing.id);
        self.state.send_modify(|state| state.selected = Some(listing));
    }

    pub fn clear_selection(&self) {
        self.state.send_if_modified(|state| state.selected.take().is_some());
    }
}
