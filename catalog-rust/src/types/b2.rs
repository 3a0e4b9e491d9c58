/// Backblaze B2 native API payloads + session capabilities

use serde::{Deserialize, Serialize};

/// b2_authorize_account (v2)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct B2AuthorizeResponse {
    pub account_id: String,
    pub authorization_token: String,
    pub api_url: String,
    pub download_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct B2ListBucketsRequest<'a> {
    pub account_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct B2ListBucketsResponse {
    #[serde(default)]
    pub buckets: Vec<B2Bucket>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct B2Bucket {
    pub bucket_id: String,
    pub bucket_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct B2UploadUrlRequest<'a> {
    pub bucket_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct B2UploadUrlResponse {
    pub upload_url: String,
    pub authorization_token: String,
}

/// Account session, shared process-wide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobSession {
    pub auth_token: String,
    pub api_url: String,
    pub download_url: String,
    pub account_id: String,
}

impl From<B2AuthorizeResponse> for BlobSession {
    fn from(resp: B2AuthorizeResponse) -> Self {
        Self {
            auth_token: resp.authorization_token,
            api_url: resp.api_url.trim_end_matches('/').to_string(),
            download_url: resp.download_url.trim_end_matches('/').to_string(),
            account_id: resp.account_id,
        }
    }
}

/// Upload URL + token, scoped to one bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCapability {
    pub upload_url: String,
    pub upload_token: String,
}

impl From<B2UploadUrlResponse> for UploadCapability {
    fn from(resp: B2UploadUrlResponse) -> Self {
        Self {
            upload_url: resp.upload_url,
            upload_token: resp.authorization_token,
        }
    }
}
