//! PokeAPI HTTP client
//!
//! Fetches resources over HTTP and decodes them into the crate's models.
//! Knows nothing about caching.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::DataSource;
use crate::error::{ApiError, Result};
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

/// Client for fetching data from PokeAPI
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Creates a client rooted at `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Request {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resource_url(&self, collection: &str, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() || name.contains('/') {
            return Err(ApiError::InvalidUrl(format!(
                "{}/{}/{}/",
                self.base_url, collection, name
            )));
        }
        Ok(format!("{}/{}/{}/", self.base_url, collection, name))
    }

    /// GETs `url` and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let parsed = Url::parse(url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", url, e)))?;

        let started = Instant::now();
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "non-success response");
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| ApiError::Request {
            url: url.to_string(),
            source,
        })?;
        debug!(url, elapsed = ?started.elapsed(), bytes = body.len(), "fetched from API");

        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl DataSource for HttpClient {
    async fn location_areas(&self, page: Option<&str>) -> Result<LocationAreaPage> {
        let url = match page {
            Some(page_url) => page_url.to_string(),
            None => format!("{}/location-area", self.base_url),
        };
        self.get_json(&url).await
    }

    async fn location_area(&self, name: &str) -> Result<LocationArea> {
        let url = self.resource_url("location-area", name)?;
        self.get_json(&url).await
    }

    async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = self.resource_url("pokemon", name)?;
        self.get_json(&url).await
    }
}
