// Match handlers.
//
// GET /api/v1/matches: every match of the last search
// GET /api/v1/matches/{id}: one match plus the source region it covers
//
// Ids are positions in the match list, starting at 0.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{info, warn};

use crate::web::handlers::matrix::ApiQuery;
use crate::web::{api_error, check_api_version, AppState, API_VERSION};

/// GET /api/v1/matches: list the matches of the last search.
pub async fn list_matches(State(state): State<AppState>, Query(query): Query<ApiQuery>) -> Response {
    if let Err(resp) = check_api_version(query.api.as_deref()) {
        return resp;
    }

    let finder = state.finder.read().await;
    let matches = finder.matches();
    info!(total = matches.len(), "list of matches requested");

    Json(serde_json::json!({
        "api": API_VERSION,
        "matches": matches,
    }))
    .into_response()
}

/// GET /api/v1/matches/{id}: a single match and its matrix region.
pub async fn get_match(
    State(state): State<AppState>,
    Path(id): Path<usize>,
    Query(query): Query<ApiQuery>,
) -> Response {
    if let Err(resp) = check_api_version(query.api.as_deref()) {
        return resp;
    }

    let finder = state.finder.read().await;
    let (Some(found), Some(region)) = (finder.get_match(id), finder.match_region(id)) else {
        warn!(id, "match not found");
        return api_error(
            StatusCode::NOT_FOUND,
            &format!("not found match with id={id}"),
        );
    };

    let (width, height) = region.size();
    info!(id, "match requested");

    Json(serde_json::json!({
        "api": API_VERSION,
        "match": found,
        "matrix": {
            "width": width,
            "height": height,
            "content": region.to_text(finder.symbols()),
        },
    }))
    .into_response()
}
