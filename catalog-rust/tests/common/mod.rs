//! Shared fixtures: a stateful fake B2 and TMDB client wiring for wiremock servers
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use otaku_catalog::config::B2Config;
use otaku_catalog::tmdb_client::client::{TmdbClient, TmdbClientOptions};
use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const BUCKET: &str = "otaku-images";

pub fn tmdb_client(server: &MockServer) -> TmdbClient {
    tmdb_client_with_key(server, Some("test-key"))
}

pub fn tmdb_client_with_key(server: &MockServer, key: Option<&str>) -> TmdbClient {
    build_tmdb_client(server, key, 2000)
}

pub fn tmdb_client_with_timeout(server: &MockServer, timeout_ms: u64) -> TmdbClient {
    build_tmdb_client(server, Some("test-key"), timeout_ms)
}

fn build_tmdb_client(server: &MockServer, key: Option<&str>, timeout_ms: u64) -> TmdbClient {
    TmdbClient::new(TmdbClientOptions {
        api_base: format!("{}/3", server.uri()),
        image_base: format!("{}/t/p", server.uri()),
        api_key: key.map(String::from),
        timeout_ms,
    })
    .unwrap()
}

/// Requests the server saw whose path starts with `prefix`
pub async fn hits(server: &MockServer, prefix: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path().starts_with(prefix))
        .count()
}

#[derive(Default)]
pub struct FakeB2State {
    pub objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    /// next N authorize calls answer 401
    pub reject_authorizations: AtomicUsize,
    /// next N downloads answer 401
    pub reject_downloads: AtomicUsize,
    /// next N get_upload_url calls answer 401
    pub reject_upload_urls: AtomicUsize,
    /// next N uploads answer 401
    pub reject_uploads: AtomicUsize,
    pub fail_uploads: AtomicBool,
    sessions: AtomicUsize,
}

pub struct FakeB2 {
    pub server: MockServer,
    pub state: Arc<FakeB2State>,
}

fn take_one(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

struct Authorize {
    state: Arc<FakeB2State>,
    uri: String,
}

impl Respond for Authorize {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        if !request.headers.contains_key("authorization")
            || take_one(&self.state.reject_authorizations)
        {
            return ResponseTemplate::new(401)
                .set_body_json(json!({"code": "unauthorized", "status": 401}));
        }
        let n = self.state.sessions.fetch_add(1, Ordering::SeqCst) + 1;
        ResponseTemplate::new(200).set_body_json(json!({
            "accountId": "acct-1",
            "authorizationToken": format!("session-{n}"),
            "apiUrl": self.uri,
            "downloadUrl": self.uri,
        }))
    }
}

struct UploadUrl {
    state: Arc<FakeB2State>,
    uri: String,
}

impl Respond for UploadUrl {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        if take_one(&self.state.reject_upload_urls) {
            return ResponseTemplate::new(401)
                .set_body_json(json!({"code": "expired_auth_token", "status": 401}));
        }
        ResponseTemplate::new(200).set_body_json(json!({
            "bucketId": "ignored",
            "uploadUrl": format!("{}/b2api/v2/upload_target", self.uri),
            "authorizationToken": "upload-token",
        }))
    }
}

struct Upload {
    state: Arc<FakeB2State>,
}

impl Respond for Upload {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        if take_one(&self.state.reject_uploads) {
            return ResponseTemplate::new(401)
                .set_body_json(json!({"code": "expired_auth_token", "status": 401}));
        }
        if self.state.fail_uploads.load(Ordering::SeqCst) {
            return ResponseTemplate::new(503).set_body_string("service unavailable");
        }
        let header = |name: &str| {
            request
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string()
        };
        let name = urlencoding::decode(&header("x-bz-file-name"))
            .map(|n| n.into_owned())
            .unwrap_or_default();
        let content_type = header("content-type");

        self.state
            .objects
            .lock()
            .unwrap()
            .insert(name.clone(), (request.body.clone(), content_type));
        ResponseTemplate::new(200).set_body_json(json!({ "fileName": name }))
    }
}

struct Download {
    state: Arc<FakeB2State>,
}

impl Respond for Download {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        if take_one(&self.state.reject_downloads) {
            return ResponseTemplate::new(401);
        }
        let prefix = format!("/file/{BUCKET}/");
        let raw = request.url.path().strip_prefix(&prefix).unwrap_or_default();
        let name = urlencoding::decode(raw).map(|n| n.into_owned()).unwrap_or_default();

        match self.state.objects.lock().unwrap().get(&name) {
            Some((data, content_type)) => {
                ResponseTemplate::new(200).set_body_raw(data.clone(), content_type)
            }
            None => ResponseTemplate::new(404),
        }
    }
}

impl FakeB2 {
    pub async fn start() -> Self {
        Self::start_with_buckets(&[("other-bucket", "bucket-x"), (BUCKET, "bucket-1")]).await
    }

    pub async fn start_with_buckets(buckets: &[(&str, &str)]) -> Self {
        let server = MockServer::start().await;
        let state = Arc::new(FakeB2State::default());
        let uri = server.uri();

        Mock::given(method("GET"))
            .and(path("/b2api/v2/b2_authorize_account"))
            .respond_with(Authorize {
                state: state.clone(),
                uri: uri.clone(),
            })
            .mount(&server)
            .await;

        let listing: Vec<_> = buckets
            .iter()
            .map(|(name, id)| json!({ "bucketName": name, "bucketId": id }))
            .collect();
        Mock::given(method("POST"))
            .and(path("/b2api/v2/b2_list_buckets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "buckets": listing })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/b2api/v2/b2_get_upload_url"))
            .respond_with(UploadUrl {
                state: state.clone(),
                uri: uri.clone(),
            })
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/b2api/v2/upload_target"))
            .respond_with(Upload {
                state: state.clone(),
            })
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/file/"))
            .respond_with(Download {
                state: state.clone(),
            })
            .mount(&server)
            .await;

        Self { server, state }
    }

    pub fn config(&self) -> B2Config {
        B2Config {
            key_id: "key-id".into(),
            application_key: "app-key".into(),
            bucket_name: BUCKET.into(),
            bucket_id: None,
            api_base: self.server.uri(),
        }
    }

    pub fn put_object(&self, name: &str, data: &[u8], content_type: &str) {
        self.state
            .objects
            .lock()
            .unwrap()
            .insert(name.to_string(), (data.to_vec(), content_type.to_string()));
    }

    pub fn object(&self, name: &str) -> Option<(Vec<u8>, String)> {
        self.state.objects.lock().unwrap().get(name).cloned()
    }

    pub async fn authorizations(&self) -> usize {
        hits(&self.server, "/b2api/v2/b2_authorize_account").await
    }

    pub async fn bucket_listings(&self) -> usize {
        hits(&self.server, "/b2api/v2/b2_list_buckets").await
    }

    pub async fn upload_urls(&self) -> usize {
        hits(&self.server, "/b2api/v2/b2_get_upload_url").await
    }

    pub async fn uploads(&self) -> usize {
        hits(&self.server, "/b2api/v2/upload_target").await
    }
}

/// Image CDN route on the TMDB mock server
pub async fn mount_image(server: &MockServer, image_path: &str, body: &[u8], content_type: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/t/p{image_path}")))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_vec(), content_type))
        .mount(server)
        .await;
}
