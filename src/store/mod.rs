pub mod error;
pub mod memory;
pub mod postgrest;
pub mod query;
pub mod traits;
pub mod types;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;
pub use query::ListingQuery;
pub use traits::ListingStore;
pub use types::FilterCriteria;
