/// Person route

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::collections::HashMap;

use super::params::{normalize_language, parse_positive_id};
use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/person/{id}", get(person_details))
}

async fn person_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let id = match parse_positive_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };
    let language = normalize_language(query.get("language").map(String::as_str));

    match state.catalog.person_details(id, &language).await {
        Ok(person) => Json(person).into_response(),
        Err(e) => ApiError::from_fetch("person_lookup_failed", &e).into_response(),
    }
}
