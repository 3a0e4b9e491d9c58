/// Image proxy route
/// /api/image/{size}/{path...} → B2 tier → TMDB CDN

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::warn;

use crate::error::{ApiError, ImageError};
use crate::services::image::ImagePath;
use crate::state::AppState;

pub const IMAGE_CACHE_CONTROL: &str = "public, max-age=604800";
pub const IMAGE_TIER_HEADER: &str = "x-image-cache";

pub fn router() -> Router<AppState> {
    Router::new().route("/api/image/{*path}", get(proxy_image))
}

async fn proxy_image(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    let result = match ImagePath::parse(&path) {
        Ok(image_path) => state.images.get_proxied_image(&image_path).await,
        Err(e) => Err(e),
    };

    let image = match result {
        Ok(image) => image,
        Err(e) => {
            if !matches!(e, ImageError::InvalidPath) {
                warn!("[IMAGE] {} failed: {}", path, e);
            }
            return ApiError::from_image(&e).into_response();
        }
    };

    let content_type = HeaderValue::from_str(&image.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, IMAGE_CACHE_CONTROL)
        .header(IMAGE_TIER_HEADER, image.tier.header_value())
        .body(Body::from(image.data))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
