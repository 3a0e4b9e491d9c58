/// Shared application state
/// One catalog service (both metadata caches) and one image service per process.

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::b2_client::client::B2Client;
use crate::config::CatalogConfig;
use crate::error::{BlobError, FetchError};
use crate::services::catalog::CatalogService;
use crate::services::image::ImageService;
use crate::tmdb_client::client::{TmdbClient, TmdbClientOptions};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build TMDB client: {0}")]
    Tmdb(#[from] FetchError),

    #[error("failed to build B2 client: {0}")]
    Blob(#[from] BlobError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub images: Arc<ImageService>,
}

impl AppState {
    pub fn new(catalog: CatalogService, images: ImageService) -> Self {
        Self {
            catalog: Arc::new(catalog),
            images: Arc::new(images),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, StartupError> {
        let tmdb = TmdbClient::new(TmdbClientOptions::from_config(config))?;

        let blob = match &config.b2 {
            Some(b2) => {
                info!("[B2] blob tier enabled, bucket {}", b2.bucket_name);
                Some(Arc::new(B2Client::new(b2.clone(), config.upstream_timeout_ms)?))
            }
            None => {
                info!("[B2] blob tier disabled");
                None
            }
        };

        Ok(Self::new(
            CatalogService::new(tmdb.clone()),
            ImageService::new(tmdb, blob),
        ))
    }
}
