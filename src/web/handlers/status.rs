// GET /api/v1/status: what is loaded and how the last search went.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::matrix::Matrix;
use crate::web::{AppState, API_VERSION};

pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    let finder = state.finder.read().await;
    let status = state.status.read().await;
    let params = finder.params();

    let size = |m: Option<&Matrix>| {
        m.map(|m| {
            let (width, height) = m.size();
            serde_json::json!({ "width": width, "height": height })
        })
    };

    Json(serde_json::json!({
        "api": API_VERSION,
        "source": size(finder.source()),
        "target": size(finder.target()),
        "percentage": params.threshold,
        "delta": params.delta,
        "total_matches": finder.matches().len(),
        "searched_at": status.searched_at,
        "last_error": status.last_error,
    }))
}
