//! PokeAPI HTTP client
//!
//! Fetches raw response bodies through the shared `TtlCache` and decodes them
//! into the models defined in the parent module.

use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::{LocationAreaDetail, LocationAreaPage, Pokemon};
use crate::cache::TtlCache;

/// Base URL for the public PokeAPI
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Number of location areas per page when none is configured
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Errors that can occur when fetching from PokeAPI
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status code
    #[error("response failed with status code: {status}")]
    Status { status: u16, url: String },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns true if the server reported that the resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

/// Read-through client for PokeAPI
///
/// Every request is keyed by its full URL. Successful response bodies are stored
/// in the cache as raw bytes; failed requests are never cached.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http_client: Client,
    cache: Arc<TtlCache>,
    base_url: String,
    page_size: u32,
}

impl PokeApiClient {
    /// Creates a client for the public PokeAPI using the given cache
    pub fn new(cache: Arc<TtlCache>) -> Self {
        Self::with_base_url(cache, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (mirrors, local servers, tests)
    pub fn with_base_url(cache: Arc<TtlCache>, base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            cache,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets how many location areas the first page requests
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// The base URL every request is built from
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The cache this client reads through
    pub fn cache(&self) -> &Arc<TtlCache> {
        &self.cache
    }

    /// URL of the first page of location areas
    pub fn first_page_url(&self) -> String {
        format!("{}/location-area?limit={}", self.base_url, self.page_size)
    }

    /// URL of a single location area
    pub fn location_area_url(&self, name: &str) -> String {
        format!("{}/location-area/{}", self.base_url, name)
    }

    /// URL of a single Pokemon
    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, name)
    }

    /// Returns the body for `url`, from the cache if present, otherwise over HTTP
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - The raw response body
    /// * `Err(ApiError)` - If the request fails or the status is not 2xx
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        if let Some(body) = self.cache.get(url) {
            tracing::debug!(url, "cache hit");
            return Ok(body);
        }

        tracing::debug!(url, "cache miss, fetching");
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?.to_vec();
        self.cache.put(url, body.clone());
        Ok(body)
    }

    /// Fetches one page of location areas
    ///
    /// # Arguments
    /// * `url` - A `next`/`previous` link from an earlier page, or `None` for the first page
    pub async fn location_areas(&self, url: Option<&str>) -> Result<LocationAreaPage, ApiError> {
        match url {
            Some(url) => self.fetch_json(url).await,
            None => self.fetch_json(&self.first_page_url()).await,
        }
    }

    /// Fetches a location area and its possible encounters
    pub async fn location_area(&self, name: &str) -> Result<LocationAreaDetail, ApiError> {
        self.fetch_json(&self.location_area_url(name)).await
    }

    /// Fetches a Pokemon by name
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon, ApiError> {
        self.fetch_json(&self.pokemon_url(name)).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let body = self.fetch(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
