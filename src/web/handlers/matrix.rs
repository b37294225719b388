// Matrix handlers.
//
// PUT /api/v1/matrix/{name}: load the source or target from text
// GET /api/v1/matrix/{name}: return a loaded matrix as text
//
// `{name}` is `source` or `target`, in any case. Matrix text uses the
// session's on/off symbols, one line per row.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::MatrixName;
use crate::web::{api_error, check_api_version, finder_error, AppState, API_VERSION};

#[derive(Deserialize)]
pub struct LoadMatrixRequest {
    pub api: Option<String>,
    /// The matrix text.
    pub content: String,
}

#[derive(Deserialize, Default)]
pub struct ApiQuery {
    pub api: Option<String>,
}

/// PUT /api/v1/matrix/{name}: parse and install a matrix.
pub async fn load_matrix(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<LoadMatrixRequest>,
) -> Response {
    if let Err(resp) = check_api_version(req.api.as_deref()) {
        return resp;
    }
    let Some(name) = MatrixName::parse(&name) else {
        return unknown_matrix(&name);
    };

    let mut finder = state.finder.write().await;
    match finder.load(name, req.content.as_bytes()) {
        Ok(matrix) => {
            let (width, height) = matrix.size();
            info!(matrix = %name, width, height, "matrix loaded");
            Json(serde_json::json!({
                "api": API_VERSION,
                "name": name,
                "width": width,
                "height": height,
            }))
            .into_response()
        }
        Err(e) => {
            warn!(matrix = %name, error = %e, "failed to load matrix");
            finder_error(&e)
        }
    }
}

/// GET /api/v1/matrix/{name}: return a loaded matrix.
pub async fn get_matrix(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<ApiQuery>,
) -> Response {
    if let Err(resp) = check_api_version(query.api.as_deref()) {
        return resp;
    }
    let Some(name) = MatrixName::parse(&name) else {
        return unknown_matrix(&name);
    };

    let finder = state.finder.read().await;
    let Some(matrix) = finder.matrix(name) else {
        return api_error(
            StatusCode::NOT_FOUND,
            &format!("{name} matrix not found, load the matrix"),
        );
    };

    let (width, height) = matrix.size();
    info!(matrix = %name, width, height, "sending matrix");

    Json(serde_json::json!({
        "api": API_VERSION,
        "name": name,
        "width": width,
        "height": height,
        "content": matrix.to_text(finder.symbols()),
    }))
    .into_response()
}

fn unknown_matrix(name: &str) -> Response {
    api_error(
        StatusCode::NOT_FOUND,
        &format!("unknown matrix {name:?}, expected 'source' or 'target'"),
    )
}
