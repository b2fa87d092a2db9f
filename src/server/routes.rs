//! HTTP routes for classification and stats

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::Grid;
use crate::error::{Error, GridError};
use crate::ledger::Stats;
use crate::Node;

pub const MUTANT_PATH: &str = "/api/v1/mutant";
pub const STATS_PATH: &str = "/api/v1/stats";

#[derive(Clone)]
pub struct AppState { pub node: Node, pub app_name: String }

/// Raw request body. Rows are validated into a [`Grid`] by the handler so the
/// shape error can be reported in the 422 body.
#[derive(Debug, Deserialize)]
pub struct DnaRequest { pub dna: Vec<String> }

#[derive(Serialize)]
struct MessageResponse { message: &'static str }

pub fn create_router(node: Node) -> Router {
    let app_name = node.config().app.clone();
    create_router_with_name(node, &app_name)
}

pub fn create_router_with_name(node: Node, app_name: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(MUTANT_PATH, post(detect_mutant))
        .route(&format!("{MUTANT_PATH}/"), post(detect_mutant))
        .route(STATS_PATH, get(stats))
        .route(&format!("{STATS_PATH}/"), get(stats))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { node, app_name: app_name.to_string() })
}

async fn health(State(s): State<AppState>) -> impl IntoResponse {
    Json(json!({"status": "ok", "service": s.app_name}))
}

/// 200 for mutants, 403 for humans.
async fn detect_mutant(
    State(s): State<AppState>,
    payload: Result<Json<DnaRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let grid = Grid::new(request.dna)?;
    let node = s.node.clone();
    let is_mutant = tokio::task::spawn_blocking(move || node.classify(&grid))
        .await
        .map_err(|e| ApiError::Task(e.to_string()))??;

    if is_mutant {
        Ok(Json(MessageResponse { message: "Mutant detected" }).into_response())
    } else {
        Ok((StatusCode::FORBIDDEN, Json(json!({"detail": "Not a mutant"}))).into_response())
    }
}

async fn stats(State(s): State<AppState>) -> Result<Json<Stats>, ApiError> {
    let node = s.node.clone();
    let stats = tokio::task::spawn_blocking(move || node.stats())
        .await
        .map_err(|e| ApiError::Task(e.to_string()))??;
    Ok(Json(stats))
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Body(#[from] JsonRejection),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Ledger(#[from] Error),
    #[error("blocking task failed: {0}")]
    Task(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        match self {
            ApiError::Body(rejection) => {
                (rejection.status(), Json(json!({"detail": rejection.body_text()}))).into_response()
            }
            ApiError::Grid(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"detail": [{"type": "value_error", "loc": ["body", "dna"], "msg": err.to_string()}]})),
            )
                .into_response(),
            ApiError::Ledger(Error::IntegrityConflict { .. }) => (
                StatusCode::BAD_REQUEST,
                Json(json!({"message": "Integrity error", "code": "INT001"})),
            )
                .into_response(),
            ApiError::Ledger(Error::Unavailable(_)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"message": "Storage unavailable", "code": "STO001"})),
            )
                .into_response(),
            ApiError::Task(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "An unexpected error occurred", "details": "Contact admin site"})),
            )
                .into_response(),
        }
    }
}
