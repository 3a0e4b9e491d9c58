/// Backblaze B2 client
/// Durable image cache tier. Session → bucket id → upload URL, each lazily acquired.
/// 401 anywhere never reaches the caller: downloads become a miss, uploads are skipped.

use base64::Engine;
use bytes::Bytes;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use sha1::{Digest, Sha1};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::capability::CapabilityCell;
use crate::config::B2Config;
use crate::error::BlobError;
use crate::types::b2::{
    B2AuthorizeResponse, B2ListBucketsRequest, B2ListBucketsResponse, B2UploadUrlRequest,
    B2UploadUrlResponse, BlobSession, UploadCapability,
};

/// Stored object
#[derive(Debug, Clone)]
pub struct BlobObject {
    pub data: Bytes,
    pub content_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    NotFound,
    /// session was rejected and discarded
    Unauthorized,
}

/// Download outcome; hard failures travel as `Err(BlobError)`
#[derive(Debug, Clone)]
pub enum BlobLookup {
    Found(BlobObject),
    Miss(MissReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Stored,
    /// rejected as unauthorized, capability discarded
    Skipped,
}

fn is_unauthorized(err: &BlobError) -> bool {
    matches!(err, BlobError::Status { status: 401, .. })
}

/// Percent-encodes each path segment, keeps '/'
fn encode_file_name(name: &str) -> String {
    name.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn sha1_hex(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

async fn error_from(response: Response) -> BlobError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    BlobError::Status { status, body }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BlobError> {
    if !response.status().is_success() {
        return Err(error_from(response).await);
    }
    response.json::<T>().await.map_err(BlobError::from_reqwest)
}

pub struct B2Client {
    config: B2Config,
    http: Client,
    session: CapabilityCell<BlobSession>,
    bucket_id: CapabilityCell<String>,
    upload: CapabilityCell<UploadCapability>,
}

impl B2Client {
    pub fn new(config: B2Config, timeout_ms: u64) -> Result<Self, BlobError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(BlobError::from_reqwest)?;

        let bucket_id = match &config.bucket_id {
            Some(id) => CapabilityCell::valid(id.clone()),
            None => CapabilityCell::new(),
        };

        Ok(Self {
            config,
            http,
            session: CapabilityCell::new(),
            bucket_id,
            upload: CapabilityCell::new(),
        })
    }

    pub fn bucket_name(&self) -> &str {
        &self.config.bucket_name
    }

    /// Cached session, acquired on first use
    pub async fn authorize(&self) -> Result<BlobSession, BlobError> {
        self.session
            .get_or_acquire(move || async move {
                let credentials = format!("{}:{}", self.config.key_id, self.config.application_key);
                let basic = base64::engine::general_purpose::STANDARD.encode(credentials);
                let url = format!(
                    "{}/b2api/v2/b2_authorize_account",
                    self.config.api_base.trim_end_matches('/')
                );

                let response = self
                    .http
                    .get(&url)
                    .header(header::AUTHORIZATION, format!("Basic {}", basic))
                    .send()
                    .await
                    .map_err(BlobError::from_reqwest)?;

                let session: BlobSession = decode::<B2AuthorizeResponse>(response).await?.into();
                info!("[B2] authorized account {}", session.account_id);
                Ok(session)
            })
            .await
    }

    /// Static id if configured, otherwise list buckets and match by name. Never invalidated.
    pub async fn resolve_bucket_id(&self, session: &BlobSession) -> Result<String, BlobError> {
        self.bucket_id
            .get_or_acquire(move || async move {
                let response = self
                    .http
                    .post(format!("{}/b2api/v2/b2_list_buckets", session.api_url))
                    .header(header::AUTHORIZATION, &session.auth_token)
                    .json(&B2ListBucketsRequest {
                        account_id: &session.account_id,
                    })
                    .send()
                    .await
                    .map_err(BlobError::from_reqwest)?;

                let listing: B2ListBucketsResponse = decode(response).await?;
                let bucket = listing
                    .buckets
                    .into_iter()
                    .find(|b| b.bucket_name == self.config.bucket_name)
                    .ok_or_else(|| BlobError::BucketNotFound(self.config.bucket_name.clone()))?;

                info!("[B2] bucket {} → {}", bucket.bucket_name, bucket.bucket_id);
                Ok(bucket.bucket_id)
            })
            .await
    }

    pub async fn acquire_upload_capability(
        &self,
        session: &BlobSession,
    ) -> Result<UploadCapability, BlobError> {
        self.upload
            .get_or_acquire(move || async move {
                let bucket_id = self.resolve_bucket_id(session).await?;
                let response = self
                    .http
                    .post(format!("{}/b2api/v2/b2_get_upload_url", session.api_url))
                    .header(header::AUTHORIZATION, &session.auth_token)
                    .json(&B2UploadUrlRequest {
                        bucket_id: &bucket_id,
                    })
                    .send()
                    .await
                    .map_err(BlobError::from_reqwest)?;

                let capability: UploadCapability =
                    decode::<B2UploadUrlResponse>(response).await?.into();
                debug!("[B2] upload url acquired");
                Ok(capability)
            })
            .await
    }

    pub async fn download_by_name(&self, name: &str) -> Result<BlobLookup, BlobError> {
        let session = match self.authorize().await {
            Ok(session) => session,
            Err(err) if is_unauthorized(&err) => {
                warn!("[B2] authorize rejected, treating {} as a miss", name);
                return Ok(BlobLookup::Miss(MissReason::Unauthorized));
            }
            Err(err) => return Err(err),
        };

        let url = format!(
            "{}/file/{}/{}",
            session.download_url,
            encode_file_name(&self.config.bucket_name),
            encode_file_name(name)
        );

        let response = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, &session.auth_token)
            .send()
            .await
            .map_err(BlobError::from_reqwest)?;

        match response.status() {
            status if status.is_success() => {
                let content_type = response
                    .headers()
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = response.bytes().await.map_err(BlobError::from_reqwest)?;
                debug!("[B2] hit {} ({} bytes)", name, data.len());
                Ok(BlobLookup::Found(BlobObject { data, content_type }))
            }
            StatusCode::NOT_FOUND => {
                debug!("[B2] miss {}", name);
                Ok(BlobLookup::Miss(MissReason::NotFound))
            }
            StatusCode::UNAUTHORIZED => {
                warn!("[B2] session expired during download, discarding");
                self.session.invalidate().await;
                Ok(BlobLookup::Miss(MissReason::Unauthorized))
            }
            _ => Err(error_from(response).await),
        }
    }

    /// Sends X-Bz-Content-Sha1 so B2 verifies the payload
    pub async fn upload_file(
        &self,
        name: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<UploadOutcome, BlobError> {
        let capability = match self.authorized_upload_capability().await {
            Ok(capability) => capability,
            Err(err) if is_unauthorized(&err) => {
                warn!("[B2] upload url rejected, discarding session");
                self.session.invalidate().await;
                return Ok(UploadOutcome::Skipped);
            }
            Err(err) => return Err(err),
        };

        let checksum = sha1_hex(&data);
        let response = self
            .http
            .post(&capability.upload_url)
            .header(header::AUTHORIZATION, &capability.upload_token)
            .header("X-Bz-File-Name", encode_file_name(name))
            .header(header::CONTENT_TYPE, content_type)
            .header("X-Bz-Content-Sha1", checksum)
            .body(data)
            .send()
            .await
            .map_err(BlobError::from_reqwest)?;

        match response.status() {
            status if status.is_success() => {
                debug!("[B2] stored {}", name);
                Ok(UploadOutcome::Stored)
            }
            StatusCode::UNAUTHORIZED => {
                warn!("[B2] upload token expired, discarding");
                self.upload.invalidate().await;
                Ok(UploadOutcome::Skipped)
            }
            _ => Err(error_from(response).await),
        }
    }

    async fn authorized_upload_capability(&self) -> Result<UploadCapability, BlobError> {
        let session = self.authorize().await?;
        self.acquire_upload_capability(&session).await
    }
}
