mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use common::{hits, tmdb_client, tmdb_client_with_timeout, FakeB2};
use otaku_catalog::b2_client::client::B2Client;
use otaku_catalog::error::{ApiError, BlobError, FetchError, ImageError};
use otaku_catalog::services::catalog::CatalogService;
use otaku_catalog::services::image::{ImagePath, ImageService};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SLOW: Duration = Duration::from_millis(800);

#[tokio::test]
async fn slow_image_cdn_is_a_hard_error() {
    let tmdb = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/t/p/w500/slow.jpg"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"late".to_vec(), "image/jpeg")
                .set_delay(SLOW),
        )
        .mount(&tmdb)
        .await;
    let service = ImageService::new(tmdb_client_with_timeout(&tmdb, 200), None);

    let err = service
        .get_proxied_image(&ImagePath::parse("w500/slow.jpg").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, ImageError::Upstream(FetchError::Timeout)));
    assert_eq!(ApiError::from_image(&err).status, StatusCode::BAD_GATEWAY);
    // no size fallback on timeout
    assert_eq!(hits(&tmdb, "/t/p/").await, 1);
}

#[tokio::test]
async fn slow_api_call_times_out() {
    let tmdb = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/multi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}").set_delay(SLOW))
        .mount(&tmdb)
        .await;
    let catalog = CatalogService::new(tmdb_client_with_timeout(&tmdb, 200));

    let err = catalog.search_titles("naruto", "ru-RU", 1).await.unwrap_err();

    assert!(matches!(err, FetchError::Timeout));
    assert_eq!(
        ApiError::from_fetch("search_failed", &err).status,
        StatusCode::BAD_GATEWAY
    );
}

#[tokio::test]
async fn slow_blob_download_is_not_a_miss() {
    let tmdb = MockServer::start().await;
    let fake = FakeB2::start().await;
    Mock::given(method("GET"))
        .and(path("/file/otaku-images/tmdb/w500/slow.jpg"))
        .respond_with(ResponseTemplate::new(404).set_delay(SLOW))
        .with_priority(1)
        .mount(&fake.server)
        .await;
    let b2 = B2Client::new(fake.config(), 200).unwrap();
    let service = ImageService::new(tmdb_client(&tmdb), Some(Arc::new(b2)));

    let err = service
        .get_proxied_image(&ImagePath::parse("w500/slow.jpg").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, ImageError::Blob(BlobError::Timeout)));
    assert_eq!(ApiError::from_image(&err).status, StatusCode::BAD_GATEWAY);
    assert_eq!(hits(&tmdb, "/t/p/").await, 0);
}
