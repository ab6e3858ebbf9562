use crate::config::StoreConfig;
use crate::models::Listing;
use crate::store::error::StoreError;
use crate::store::query::ListingQuery;
use crate::store::traits::ListingStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Listing store backed by a PostgREST endpoint (`/rest/v1/<table>`)
pub struct PostgrestStore {
    client: Client,
    base_url: String,
    table: String,
}

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

impl PostgrestStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&config.api_key)
            .context("Store API key is not a valid header value")?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .context("Store API key is not a valid header value")?;
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("plot-scout/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            table: config.table.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

#[async_trait]
impl ListingStore for PostgrestStore {
    async fn fetch_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>, StoreError> {
        let url = self.endpoint();
        let params = query.to_query_pairs();

        debug!("Fetching {} with {} query parameters", url, params.len());

        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Listing store returned status: {}", status);
            return Err(backend_error(status, &body));
        }

        let listings: Vec<Listing> = serde_json::from_str(&body)?;
        debug!("Decoded {} plots ({} bytes)", listings.len(), body.len());

        Ok(listings)
    }

    fn store_name(&self) -> &'static str {
        "PostgREST"
    }
}

/// Turn a non-success response into a `StoreError::Backend`, keeping the
/// raw body as the message when it is not a PostgREST error object
fn backend_error(status: StatusCode, body: &str) -> StoreError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error) => {
            let mut message = error.message;
            if let Some(details) = error.details.filter(|d| !d.is_empty()) {
                message.push_str(&format!(" ({})", details));
            }
            if let Some(hint) = error.hint.filter(|h| !h.is_empty()) {
                message.push_str(&format!(" hint: {}", hint));
            }
            StoreError::Backend {
                status: status.as_u16(),
                code: error.code,
                message,
            }
        }
        Err(_) => StoreError::Backend {
            status: status.as_u16(),
            code: None,
            message: body.trim().to_string(),
        },
    }
}
