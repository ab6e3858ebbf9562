use crate::models::Listing;
use crate::store::error::StoreError;
use crate::store::query::ListingQuery;
use async_trait::async_trait;
use std::sync::Arc;

/// Read access to the remote plot listings.
/// The controller is handed one of these at construction, so tests can
/// swap the REST backend for an in-memory or scripted store.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Run the query and return the matching plots with their council,
    /// district and region joined in
    async fn fetch_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>, StoreError>;

    /// Get the name of the store backend
    fn store_name(&self) -> &'static str;
}

#[async_trait]
impl<T: ListingStore + ?Sized> ListingStore for Arc<T> {
    async fn fetch_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>, StoreError> {
        (**self).fetch_listings(query).await
    }

    fn store_name(&self) -> &'static str {
        (**self).store_name()
    }
}
