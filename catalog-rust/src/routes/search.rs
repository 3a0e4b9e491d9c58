/// Search route

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::collections::HashMap;

use super::params::{normalize_language, normalize_page, sanitize_query};
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/search", get(search))
}

async fn search(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let text = sanitize_query(query.get("query").map(String::as_str));
    let language = normalize_language(query.get("language").map(String::as_str));
    let page = normalize_page(query.get("page").map(String::as_str));

    if text.is_empty() {
        return ApiError::bad_request("query_required", "query is required").into_response();
    }

    match state.catalog.search_titles(&text, &language, page).await {
        Ok(results) => Json(results).into_response(),
        Err(e) => ApiError::from_fetch("search_failed", &e).into_response(),
    }
}
