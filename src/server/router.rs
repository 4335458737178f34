//! Run API routes

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use testflow_model::{Flow, Step};
use testflow_runner::{RunOptions, RunnerError, StepReport};
use tower_http::cors::CorsLayer;
use tracing::info;

use super::state::ServeState;

pub fn build_run_router(state: ServeState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/run", post(run_flow))
        // The caller is a browser-hosted editor; stay permissive.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// An ordered list of steps to execute.
#[derive(Debug, Deserialize)]
pub struct RunRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub steps: Vec<Step>,
}

/// Per-step results in attempt order; the list stops at the first error.
#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub success: bool,
    pub results: Vec<StepReport>,
}

async fn run_flow(State(state): State<ServeState>, Json(request): Json<RunRequest>) -> Response {
    if request.steps.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "no steps provided" })),
        )
            .into_response();
    }

    let mut flow = Flow::new();
    if let Some(title) = request.title {
        flow.title = title;
    }
    flow.steps = request.steps;

    let options = RunOptions {
        action_timeout: state.action_timeout,
    };
    match state.runner.run(&flow, options).await {
        Ok(report) => {
            info!(
                steps = report.steps.len(),
                success = report.success,
                "Run request finished"
            );
            (
                StatusCode::OK,
                Json(RunResponse {
                    success: report.success,
                    results: report.steps,
                }),
            )
                .into_response()
        }
        Err(RunnerError::AlreadyRunning) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": RunnerError::AlreadyRunning.to_string() })),
        )
            .into_response(),
        Err(err @ (RunnerError::EmptyFlow | RunnerError::InvalidFlow(_))) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}
