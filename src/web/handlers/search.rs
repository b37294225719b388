// POST /api/v1/search: run the search over the loaded matrices.
//
// The optional `percentage` and `delta` fields override the session
// parameters for this and later searches; zero means "keep". The body
// may be omitted entirely, which runs with the session parameters. Returns 409
// if the source or target has not been loaded yet.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::{error, info};

use crate::finder::SearchOverrides;
use crate::web::{check_api_version, finder_error, AppState, API_VERSION};

#[derive(Deserialize, Default)]
pub struct SearchRequest {
    pub api: Option<String>,
    pub percentage: Option<f64>,
    pub delta: Option<usize>,
}

pub async fn search(
    State(state): State<AppState>,
    req: Option<Json<SearchRequest>>,
) -> Response {
    let req = req.map(|Json(req)| req).unwrap_or_default();
    if let Err(resp) = check_api_version(req.api.as_deref()) {
        return resp;
    }

    let overrides = SearchOverrides {
        threshold: req.percentage,
        delta: req.delta,
    };

    let mut finder = state.finder.write().await;
    let result = finder.search_with(overrides).map(<[_]>::len);
    let params = finder.params();
    drop(finder);

    let mut status = state.status.write().await;
    match result {
        Ok(total) => {
            status.searched_at = Some(Utc::now().to_rfc3339());
            status.last_error = None;
            info!(
                percentage = params.threshold,
                delta = params.delta,
                total,
                "searched target matrix in source matrix"
            );
            Json(serde_json::json!({
                "api": API_VERSION,
                "total_matches": total,
            }))
            .into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to search the target matrix");
            status.last_error = Some(e.to_string());
            finder_error(&e)
        }
    }
}
