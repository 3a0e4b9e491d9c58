/// Image pipelines
/// size fallback: requested size 404 → "original" (one hop, at most 2 CDN calls)
/// storage tier: B2 by name → CDN (size fallback) → best-effort write back to B2

use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::b2_client::client::{B2Client, BlobLookup, UploadOutcome};
use crate::error::{FetchError, ImageError};
use crate::tmdb_client::client::{ImagePayload, TmdbClient};

pub const ORIGINAL_SIZE: &str = "original";
const BLOB_PREFIX: &str = "tmdb";

/// Which tier answered, exposed as X-Image-Cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTier {
    /// served from B2
    Blob,
    /// B2 enabled but missed, served from the CDN
    Miss,
    /// B2 disabled
    Bypass,
}

impl ImageTier {
    pub fn header_value(self) -> &'static str {
        match self {
            ImageTier::Blob => "blob",
            ImageTier::Miss => "miss",
            ImageTier::Bypass => "bypass",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProxiedImage {
    pub data: Bytes,
    pub content_type: String,
    pub tier: ImageTier,
}

/// Validated `{size}/{rest...}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePath {
    size: String,
    rest: String,
}

impl ImagePath {
    pub fn parse(path: &str) -> Result<Self, ImageError> {
        let path = path.trim_start_matches('/');
        let (size, rest) = path.split_once('/').ok_or(ImageError::InvalidPath)?;

        let size_ok = !size.is_empty() && size.bytes().all(|b| b.is_ascii_alphanumeric());
        let rest_ok = !rest.is_empty()
            && rest
                .split('/')
                .all(|segment| !segment.is_empty() && segment != "." && segment != "..");
        if !size_ok || !rest_ok {
            return Err(ImageError::InvalidPath);
        }

        Ok(Self {
            size: size.to_string(),
            rest: rest.to_string(),
        })
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn is_original(&self) -> bool {
        self.size == ORIGINAL_SIZE
    }

    /// "/w500/abc.jpg"
    pub fn upstream_path(&self) -> String {
        format!("/{}/{}", self.size, self.rest)
    }

    pub fn original(&self) -> Self {
        Self {
            size: ORIGINAL_SIZE.to_string(),
            rest: self.rest.clone(),
        }
    }

    /// Blob name under the requested size, also when the bytes came from "original"
    pub fn blob_name(&self) -> String {
        format!("{}/{}/{}", BLOB_PREFIX, self.size, self.rest)
    }
}

pub struct ImageService {
    client: TmdbClient,
    blob: Option<Arc<B2Client>>,
}

impl ImageService {
    pub fn new(client: TmdbClient, blob: Option<Arc<B2Client>>) -> Self {
        Self { client, blob }
    }

    pub fn is_blob_enabled(&self) -> bool {
        self.blob.is_some()
    }

    pub async fn fetch_sized(&self, path: &ImagePath) -> Result<ImagePayload, FetchError> {
        match self.client.fetch_image(&path.upstream_path()).await {
            Err(e) if e.is_not_found() && !path.is_original() => {
                debug!("[IMAGE] {} missing at {}, trying original", path.rest, path.size);
                self.client.fetch_image(&path.original().upstream_path()).await
            }
            other => other,
        }
    }

    pub async fn get_proxied_image(&self, path: &ImagePath) -> Result<ProxiedImage, ImageError> {
        let Some(blob) = &self.blob else {
            let payload = self.fetch_sized(path).await?;
            return Ok(ProxiedImage {
                data: payload.data,
                content_type: payload.content_type,
                tier: ImageTier::Bypass,
            });
        };

        let name = path.blob_name();
        match blob.download_by_name(&name).await? {
            BlobLookup::Found(object) => {
                return Ok(ProxiedImage {
                    data: object.data,
                    content_type: object.content_type,
                    tier: ImageTier::Blob,
                })
            }
            BlobLookup::Miss(reason) => debug!("[IMAGE] blob miss {} ({:?})", name, reason),
        }

        // CDN failure after a blob miss is a hard error
        let payload = self.fetch_sized(path).await?;
        write_back(blob, &name, &payload).await;

        Ok(ProxiedImage {
            data: payload.data,
            content_type: payload.content_type,
            tier: ImageTier::Miss,
        })
    }
}

/// Repopulation is best effort: every upload error is logged and dropped here,
/// the viewer still gets the bytes.
async fn write_back(blob: &B2Client, name: &str, payload: &ImagePayload) {
    match blob
        .upload_file(name, payload.data.clone(), &payload.content_type)
        .await
    {
        Ok(UploadOutcome::Stored) => debug!("[IMAGE] cached {} in B2", name),
        Ok(UploadOutcome::Skipped) => warn!("[IMAGE] B2 upload of {} skipped (unauthorized)", name),
        Err(e) => warn!("[IMAGE] B2 upload of {} failed: {}", name, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_size_and_rest() {
        let path = ImagePath::parse("w500/abc.jpg").unwrap();
        assert_eq!(path.size(), "w500");
        assert_eq!(path.upstream_path(), "/w500/abc.jpg");
        assert_eq!(path.blob_name(), "tmdb/w500/abc.jpg");
        assert_eq!(path.original().upstream_path(), "/original/abc.jpg");
        assert!(!path.is_original());
        assert!(ImagePath::parse("/original/x/y.png").unwrap().is_original());
    }

    #[test]
    fn rejects_malformed_paths() {
        for bad in ["", "w500", "w500/", "/w500", "w-500/abc.jpg", "w500/../secret", "w500//abc.jpg"] {
            assert!(
                matches!(ImagePath::parse(bad), Err(ImageError::InvalidPath)),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn tier_header_values() {
        assert_eq!(ImageTier::Blob.header_value(), "blob");
        assert_eq!(ImageTier::Bypass.header_value(), "bypass");
    }
}
