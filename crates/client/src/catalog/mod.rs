//! Ticketing catalog API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest`; the API is the source of truth
//! - Event lists are parsed by probing known response shapes in order
//! - Shop trees are cached in memory via `moka` (configurable TTL)
//!
//! # Endpoints
//!
//! - `GET {base}{events_path}?channel={channel}` - event list
//! - `GET {base}{shop_path}/{channel}/{event}` - ticket shop tree
//! - `{image_host}/files/{guid}` - cover images (URL only, never fetched)
//!
//! # Example
//!
//! ```rust,ignore
//! use ticketbox_client::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog)?;
//!
//! let events = client.list_events().await?;
//! let shop = client.get_shop(&events[0].key).await?;
//! ```

pub mod conversions;
pub mod shapes;

use std::sync::Arc;

use moka::future::Cache;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use ticketbox_core::{Event, EventKey, ShopTree};
use url::Url;

use crate::config::CatalogConfig;

use conversions::{convert_event, convert_shop};
use shapes::{find_event_list, top_level_keys};

/// Maximum number of characters of an error body kept in logs.
const LOG_BODY_LIMIT: usize = 500;

/// Maximum number of shop trees kept in memory.
const SHOP_CACHE_CAPACITY: u64 = 100;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error: {status} - {body}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Response body as text.
        body: String,
    },

    /// The response body was not valid JSON (or not the expected JSON).
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An endpoint URL could not be built from the configuration.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the ticketing catalog API.
///
/// Cheap to clone; clones share the HTTP connection pool and shop cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    config: CatalogConfig,
    shops: Option<Cache<EventKey, ShopTree>>,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.config.base_url)
            .field("channel", &self.inner.config.channel)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        let shops = (!config.shop_cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(SHOP_CACHE_CAPACITY)
                .time_to_live(config.shop_cache_ttl)
                .build()
        });

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                config: config.clone(),
                shops,
            }),
        })
    }

    /// Configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    /// Build an endpoint URL from a configured path and extra path segments.
    fn endpoint(&self, path: &str, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = Url::parse(&format!("{}{}", self.inner.config.base_url, path))?;
        if let Ok(mut parts) = url.path_segments_mut() {
            parts.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Issue a GET and parse the body as JSON.
    async fn get_json(&self, url: Url) -> Result<Value, CatalogError> {
        debug!(url = %url, "Fetching");

        let response = self
            .inner
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "Response received");

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %truncate(&body, LOG_BODY_LIMIT),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %truncate(&body, LOG_BODY_LIMIT),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Fetch the event list for the configured channel.
    ///
    /// A payload in none of the known shapes yields an empty list rather
    /// than an error. Records without a key are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a
    /// non-success status, or the body is not JSON.
    #[instrument(skip(self), fields(channel = %self.inner.config.channel))]
    pub async fn list_events(&self) -> Result<Vec<Event>, CatalogError> {
        let mut url = self.endpoint(&self.inner.config.events_path, &[])?;
        url.query_pairs_mut()
            .append_pair("channel", &self.inner.config.channel);

        let payload = self.get_json(url).await?;

        let Some((shape, records)) = find_event_list(&payload) else {
            warn!(
                keys = ?top_level_keys(&payload),
                "No events array found in response"
            );
            return Ok(Vec::new());
        };
        debug!(shape = shape.name, count = records.len(), "Events found");

        let events: Vec<Event> = records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| match convert_event(record) {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!(index, error = %e, "Skipping event record");
                    None
                }
            })
            .collect();

        debug!(count = events.len(), "Mapped events");
        Ok(events)
    }

    // =========================================================================
    // Shop
    // =========================================================================

    /// Fetch the ticket shop for one event.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the API answers 404, or another
    /// error if the request or parsing fails.
    #[instrument(skip(self), fields(event_key = %event_key))]
    pub async fn get_shop(&self, event_key: &EventKey) -> Result<ShopTree, CatalogError> {
        if let Some(cache) = &self.inner.shops
            && let Some(shop) = cache.get(event_key).await
        {
            debug!("Cache hit for shop");
            return Ok(shop);
        }

        let url = self.endpoint(
            &self.inner.config.shop_path,
            &[&self.inner.config.channel, event_key.as_str()],
        )?;

        let payload = match self.get_json(url).await {
            Ok(payload) => payload,
            Err(CatalogError::Remote { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                return Err(CatalogError::NotFound(format!("Shop not found: {event_key}")));
            }
            Err(e) => return Err(e),
        };

        let shop = convert_shop(payload, event_key)?;
        debug!(
            groups = shop.children.len(),
            ticket_types = shop.ticket_type_dictionary.len(),
            "Shop loaded"
        );

        if let Some(cache) = &self.inner.shops {
            cache.insert(event_key.clone(), shop.clone()).await;
        }

        Ok(shop)
    }

    /// Drop a cached shop so the next `get_shop` hits the API.
    pub async fn invalidate_shop(&self, event_key: &EventKey) {
        if let Some(cache) = &self.inner.shops {
            cache.invalidate(event_key).await;
        }
    }

    // =========================================================================
    // Images
    // =========================================================================

    /// URL of a cover image by GUID.
    #[must_use]
    pub fn image_url(&self, guid: &str) -> String {
        format!("{}/files/{guid}", self.inner.config.image_host)
    }
}

fn truncate(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}
