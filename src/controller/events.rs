use crate::controller::{ListingController, LoadOutcome, ViewMode};
use crate::models::Listing;
use crate::store::{FilterCriteria, ListingStore, StoreError};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info};

/// Events emitted by the grid view, the map view and the filter panel
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Filter panel submitted a fully populated set of criteria
    FiltersChanged(FilterCriteria),
    /// "View" pressed on a grid card
    ViewRequested(Listing),
    /// Marker clicked on the map
    ListingClicked(Listing),
    ViewModeChanged(ViewMode),
    SelectionCleared,
    Refresh,
}

impl<S: ListingStore + 'static> ListingController<S> {
    /// Apply one event. Returns the load outcome for events that fetch.
    pub async fn handle_event(&self, event: UiEvent) -> Result<Option<LoadOutcome>, StoreError> {
        match event {
            UiEvent::FiltersChanged(filters) => self.load_listings(Some(filters)).await.map(Some),
            UiEvent::Refresh => self.refresh().await.map(Some),
            UiEvent::ViewRequested(listing) | UiEvent::ListingClicked(listing) => {
                self.select_listing(listing);
                Ok(None)
            }
            UiEvent::ViewModeChanged(mode) => {
                self.set_view_mode(mode);
                Ok(None)
            }
            UiEvent::SelectionCleared => {
                self.clear_selection();
                Ok(None)
            }
        }
    }

    /// Drive the controller from a UI event channel until it closes.
    ///
    /// Fetches run as separate tasks so view toggles and selections are
    /// applied while a load is still in flight. Outstanding loads are
    /// awaited before returning.
    pub async fn run(self: Arc<Self>, mut events: mpsc::Receiver<UiEvent>) {
        let mut loads: JoinSet<Result<Option<LoadOutcome>, StoreError>> = JoinSet::new();

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event @ (UiEvent::FiltersChanged(_) | UiEvent::Refresh)) => {
                        let controller = self.clone();
                        loads.spawn(async move { controller.handle_event(event).await });
                    }
                    Some(event) => {
                        // never fetches, so it cannot fail
                        let _ = self.handle_event(event).await;
                    }
                    None => break,
                },
                Some(joined) = loads.join_next(), if !loads.is_empty() => report(joined),
            }
        }

        while let Some(joined) = loads.join_next().await {
            report(joined);
        }

        info!("UI event channel closed, plot search stopped");
    }
}

fn report(joined: Result<Result<Option<LoadOutcome>, StoreError>, JoinError>) {
    match joined {
        Ok(Ok(outcome)) => debug!("Load finished: {:?}", outcome),
        Ok(Err(e)) => error!("Failed to load plots: {}", e),
        Err(e) => error!("Load task aborted: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UsageType;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_filters_changed_loads() {
        let controller = ListingController::new(MemoryStore::with_demo_plots());

        let outcome = controller
            .handle_event(UiEvent::FiltersChanged(FilterCriteria {
                usage_type: Some(UsageType::Industrial),
                ..Default::default()
            }))
            .await
            .unwrap();

        assert_eq!(outcome, Some(LoadOutcome::Applied { count: 1 }));
        assert_eq!(controller.snapshot().listings[0].id, "plot-005");
    }

    #[tokio::test]
    async fn test_view_and_click_select_without_loading() {
        let controller = ListingController::new(MemoryStore::with_demo_plots());
        controller.mount().await.unwrap();
        let first = controller.snapshot().listings[0].clone();
        let second = controller.snapshot().listings[1].clone();

        let outcome = controller.handle_event(UiEvent::ViewRequested(first.clone())).await.unwrap();
        assert!(outcome.is_none());
        assert_eq!(controller.snapshot().selected, Some(first));

        controller.handle_event(UiEvent::ViewModeChanged(ViewMode::Map)).await.unwrap();
        controller.handle_event(UiEvent::ListingClicked(second.clone())).await.unwrap();
        let state = controller.snapshot();
        assert_eq!(state.selected, Some(second));
        assert_eq!(state.view_mode, ViewMode::Map);
        assert!(!state.is_loading);

        controller.handle_event(UiEvent::SelectionCleared).await.unwrap();
        assert!(controller.snapshot().selected.is_none());
    }

    #[tokio::test]
    async fn test_run_drains_loads_before_returning() {
        let controller = Arc::new(ListingController::new(MemoryStore::with_demo_plots()));
        let (tx, rx) = mpsc::channel(8);

        tx.send(UiEvent::FiltersChanged(FilterCriteria {
            search: "plot".to_string(),
            ..Default::default()
        }))
        .await
        .unwrap();
        tx.send(UiEvent::ViewModeChanged(ViewMode::Map)).await.unwrap();
        drop(tx);

        controller.clone().run(rx).await;

        let state = controller.snapshot();
        assert_eq!(state.view_mode, ViewMode::Map);
        assert!(!state.is_loading);
        assert_eq!(state.listings.len(), 2);
    }
}
