/// Error types
/// Upstream (TMDB) / blob store (B2) / HTTP boundary

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::types::catalog::MediaType;

/// TMDB API or image CDN failure
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Missing TMDB_API_KEY in environment")]
    MissingApiKey,

    /// caller asked a title endpoint for a non-title type
    #[error("type must be movie or tv, got {0}")]
    NotATitle(MediaType),

    #[error("upstream request failed: {status}")]
    Status { status: u16, body: String },

    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream transport error: {0}")]
    Transport(String),

    #[error("upstream payload decode error: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// B2 failure that must not be masked as a cache miss
#[derive(Debug, Clone, Error)]
pub enum BlobError {
    #[error("B2 request failed: {status}")]
    Status { status: u16, body: String },

    #[error("B2 bucket not found: {0}")]
    BucketNotFound(String),

    #[error("B2 request timed out")]
    Timeout,

    #[error("B2 transport error: {0}")]
    Transport(String),

    #[error("B2 payload decode error: {0}")]
    Decode(String),
}

impl BlobError {
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BlobError::Timeout
        } else if err.is_decode() {
            BlobError::Decode(err.to_string())
        } else {
            BlobError::Transport(err.to_string())
        }
    }
}

/// Image proxy failure
#[derive(Debug, Clone, Error)]
pub enum ImageError {
    #[error("invalid image path")]
    InvalidPath,

    #[error("image fetch failed: {0}")]
    Upstream(#[from] FetchError),

    #[error(transparent)]
    Blob(#[from] BlobError),
}

/// Endpoint error: status + short code + detail
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(code: &'static str, detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code,
            detail: detail.into(),
        }
    }

    /// Prefers the upstream status, 502 otherwise
    pub fn from_fetch(code: &'static str, err: &FetchError) -> Self {
        let (status, detail) = match err {
            FetchError::MissingApiKey => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            FetchError::NotATitle(_) => (StatusCode::BAD_REQUEST, err.to_string()),
            FetchError::Status { status, body } => (
                passthrough_status(*status),
                if body.is_empty() { err.to_string() } else { body.clone() },
            ),
            _ => (StatusCode::BAD_GATEWAY, err.to_string()),
        };
        Self { status, code, detail }
    }

    pub fn from_image(err: &ImageError) -> Self {
        match err {
            ImageError::InvalidPath => Self::bad_request("invalid_image_path", err.to_string()),
            ImageError::Upstream(FetchError::MissingApiKey) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "proxy_error",
                detail: err.to_string(),
            },
            ImageError::Upstream(inner) => Self {
                status: inner
                    .status()
                    .map(passthrough_status)
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                code: "proxy_error",
                detail: err.to_string(),
            },
            ImageError::Blob(BlobError::BucketNotFound(_)) => Self {
                status: StatusCode::NOT_FOUND,
                code: "blob_bucket_not_found",
                detail: err.to_string(),
            },
            ImageError::Blob(BlobError::Status { status, .. }) => Self {
                status: passthrough_status(*status),
                code: "blob_error",
                detail: err.to_string(),
            },
            ImageError::Blob(_) => Self {
                status: StatusCode::BAD_GATEWAY,
                code: "blob_error",
                detail: err.to_string(),
            },
        }
    }
}

/// Only error-class statuses pass through
fn passthrough_status(status: u16) -> StatusCode {
    match StatusCode::from_u16(status) {
        Ok(code) if code.is_client_error() || code.is_server_error() => code,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "error": self.code, "detail": self.detail })),
        )
            .into_response()
    }
}
