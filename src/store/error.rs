use thiserror::Error;

/// Failure while querying the listing store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network failure, timeout or a request that could not be built
    #[error("listing store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with an error body
    #[error("listing store returned {status}: {message}")]
    Backend {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The response did not match the listing contract
    #[error("malformed listing payload: {0}")]
    Decode(#[from] serde_json::Error),
}
