// Web server: Axum-based JSON API around a single search session.
//
// The server owns one `Finder`. Clients load the source and target
// matrices, run a search, then page through the matches. All routes live
// under /api/v1 and speak JSON; errors are `{"error": "..."}` bodies.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::error::FinderError;
use crate::finder::Finder;

pub mod handlers;

/// The API version implemented by this server.
pub const API_VERSION: &str = "v1";

/// Outcome of the most recent search, exposed via GET /api/v1/status.
#[derive(Debug, Clone, Default)]
pub struct SearchStatus {
    /// RFC 3339 timestamp of the last successful search.
    pub searched_at: Option<String>,
    /// Error message from the last search, if it failed.
    pub last_error: Option<String>,
}

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub finder: Arc<RwLock<Finder>>,
    pub status: Arc<RwLock<SearchStatus>>,
}

impl AppState {
    pub fn new(finder: Finder) -> Self {
        Self {
            finder: Arc::new(RwLock::new(finder)),
            status: Arc::new(RwLock::new(SearchStatus::default())),
        }
    }
}

/// Start the Axum web server and block until it exits (Ctrl-C stops it).
pub async fn run_server(finder: Finder, port: u16, bind: &str) -> Result<()> {
    let app = build_router(AppState::new(finder));

    let addr = format!("{bind}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to listen on {addr}"))?;
    info!("Finder2D API listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Finder2D API stopped");
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/v1/status", get(handlers::status::get_status))
        .route(
            "/api/v1/matrix/{name}",
            get(handlers::matrix::get_matrix).put(handlers::matrix::load_matrix),
        )
        .route("/api/v1/search", post(handlers::search::search))
        .route("/api/v1/matches", get(handlers::matches::list_matches))
        .route("/api/v1/matches/{id}", get(handlers::matches::get_match));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check: always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl-C");
        return;
    }
    warn!("received a ^C signal, shutting down the server");
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}

/// Map a core error to an HTTP error response.
pub fn finder_error(err: &FinderError) -> Response {
    let status = match err {
        FinderError::InvalidCell { .. }
        | FinderError::RowTooWide { .. }
        | FinderError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
        FinderError::NotLoaded(_) => StatusCode::CONFLICT,
        FinderError::DimensionMismatch { .. } | FinderError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    api_error(status, &err.to_string())
}

/// Reject requests that name an API version other than ours.
///
/// A missing or empty version is accepted.
pub fn check_api_version(version: Option<&str>) -> std::result::Result<(), Response> {
    match version {
        None | Some("") => Ok(()),
        Some(v) if v == API_VERSION => Ok(()),
        Some(v) => Err(api_error(
            StatusCode::NOT_IMPLEMENTED,
            &format!(
                "API version {v:?} is not supported. This service implements API version {API_VERSION:?}"
            ),
        )),
    }
}
