pub mod images;
pub mod params;
pub mod person;
pub mod search;
pub mod titles;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(search::router())
        .merge(titles::router())
        .merge(person::router())
        .merge(images::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
