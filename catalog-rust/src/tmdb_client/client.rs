/// TMDB HTTP client
/// Appends api_key to every API call, no retries. Non-2xx → FetchError::Status with body.

use bytes::Bytes;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::CatalogConfig;
use crate::error::FetchError;

#[derive(Debug, Clone)]
pub struct TmdbClientOptions {
    pub api_base: String,
    pub image_base: String,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

impl TmdbClientOptions {
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            api_base: config.tmdb_api_base.trim_end_matches('/').to_string(),
            image_base: config.tmdb_image_base.trim_end_matches('/').to_string(),
            api_key: config.tmdb_api_key.clone(),
            timeout_ms: config.upstream_timeout_ms,
        }
    }
}

/// Image bytes from the CDN
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub data: Bytes,
    pub content_type: String,
}

#[derive(Clone)]
pub struct TmdbClient {
    options: TmdbClientOptions,
    http: Client,
}

impl TmdbClient {
    pub fn new(options: TmdbClientOptions) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(options.timeout_ms))
            .build()
            .map_err(FetchError::from_reqwest)?;
        Ok(Self { options, http })
    }

    /// GET {api_base}{endpoint}?api_key=..&params. Empty params are skipped.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let api_key = self
            .options
            .api_key
            .as_deref()
            .ok_or(FetchError::MissingApiKey)?;

        let mut query: Vec<(&str, &str)> = vec![("api_key", api_key)];
        query.extend(
            params
                .iter()
                .filter(|(_, v)| !v.is_empty())
                .map(|(k, v)| (*k, v.as_str())),
        );

        let url = format!("{}{}", self.options.api_base, endpoint);
        debug!("[TMDB] GET {}", url);

        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .query(&query)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("[TMDB] {} → {}", endpoint, status.as_u16());
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().await.map_err(FetchError::from_reqwest)
    }

    /// GET {image_base}{image_path}, e.g. "/w500/abc.jpg"
    pub async fn fetch_image(&self, image_path: &str) -> Result<ImagePayload, FetchError> {
        let url = format!("{}{}", self.options.image_base, image_path);
        debug!("[TMDB] image GET {}", url);

        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "image/*")
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        // whole payload or nothing
        let data = response.bytes().await.map_err(FetchError::from_reqwest)?;

        Ok(ImagePayload { data, content_type })
    }
}
