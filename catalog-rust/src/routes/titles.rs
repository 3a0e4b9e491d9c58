/// Title routes
/// details / cast / season / batch title cards

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;

use super::params::{
    normalize_language, normalize_season_number, parse_positive_id, parse_title_type,
};
use crate::error::ApiError;
use crate::state::AppState;

/// Upper bound on refs per title-cards request
const MAX_REFS: usize = 60;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/title/{type}/{id}", get(title_details))
        .route("/api/title/{type}/{id}/cast", get(title_cast))
        .route(
            "/api/title/{type}/{id}/season/{season_number}",
            get(season_details),
        )
        .route("/api/title-cards", get(title_cards))
}

fn language_of(query: &HashMap<String, String>) -> String {
    normalize_language(query.get("language").map(String::as_str))
}

async fn title_details(
    State(state): State<AppState>,
    Path((media_type, id)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let (media_type, id) = match (parse_title_type(&media_type), parse_positive_id(&id)) {
        (Ok(t), Ok(id)) => (t, id),
        (Err(e), _) | (_, Err(e)) => return e.into_response(),
    };

    match state.catalog.title_details(media_type, id, &language_of(&query)).await {
        Ok(details) => Json(details).into_response(),
        Err(e) => ApiError::from_fetch("title_lookup_failed", &e).into_response(),
    }
}

async fn title_cast(
    State(state): State<AppState>,
    Path((media_type, id)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let (media_type, id) = match (parse_title_type(&media_type), parse_positive_id(&id)) {
        (Ok(t), Ok(id)) => (t, id),
        (Err(e), _) | (_, Err(e)) => return e.into_response(),
    };

    match state.catalog.title_cast(media_type, id, &language_of(&query)).await {
        Ok(cast) => Json(cast).into_response(),
        Err(e) => ApiError::from_fetch("cast_lookup_failed", &e).into_response(),
    }
}

async fn season_details(
    State(state): State<AppState>,
    Path((media_type, id, season_number)): Path<(String, String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if media_type != "tv" {
        return ApiError::bad_request("invalid_type", "seasons exist only for tv").into_response();
    }
    let id = match parse_positive_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };
    let Some(season_number) = normalize_season_number(&season_number) else {
        return ApiError::bad_request(
            "invalid_season_number",
            "seasonNumber must be a non-negative integer",
        )
        .into_response();
    };

    match state
        .catalog
        .season_details(id, season_number, &language_of(&query))
        .await
    {
        Ok(season) => Json(season).into_response(),
        Err(e) => ApiError::from_fetch("season_lookup_failed", &e).into_response(),
    }
}

/// ?refs=movie/550,tv/1399 → { "cards": { "movie/550": {...} } }
async fn title_cards(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let refs: Vec<String> = query
        .get("refs")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .take(MAX_REFS)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let cards = state
        .catalog
        .title_cards_by_refs(&refs, &language_of(&query))
        .await;
    Json(json!({ "cards": cards })).into_response()
}
