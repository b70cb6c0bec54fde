use axum::{
    Json, Router,
    extract::State,
    routing::post,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::errors::SearchError;
use crate::models::SearchRequest;
use crate::registry::SearchRegistry;
use crate::response::ShapedResponse;
use crate::search::DynamicSearch;

/// Shared state for the bundled search endpoint.
#[derive(Clone)]
pub struct SearchState {
    pub db: DatabaseConnection,
    pub registry: Arc<SearchRegistry>,
    pub search: DynamicSearch,
}

/// POST handler running the state's [`DynamicSearch`] against the request
/// body. Applications needing per-request static conditions call
/// [`DynamicSearch::execute`] from their own handlers instead.
pub async fn dynamic_search(
    State(state): State<SearchState>,
    Json(request): Json<SearchRequest>,
) -> Result<ShapedResponse, SearchError> {
    state.search.execute(&state.db, &state.registry, &request).await
}

/// Router exposing the search endpoint at `POST /search`.
pub fn router(state: SearchState) -> Router {
    Router::new()
        .route("/search", post(dynamic_search))
        .with_state(state)
}
