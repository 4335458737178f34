//! Run API contract tests

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use testflow_cli::server::{build_run_router, ServeState};
use testflow_executor::{ExecError, SimulatedExecutor};
use testflow_runner::FlowRunner;
use tower::ServiceExt;

fn app(executor: SimulatedExecutor) -> Router {
    let runner = Arc::new(FlowRunner::new(Arc::new(executor)));
    build_run_router(ServeState::new(runner, Duration::from_secs(5)))
}

fn login_steps() -> Value {
    json!([
        {
            "id": "step-nav",
            "title": "Nav",
            "actions": [
                { "id": "action-nav", "type": "Navigate", "target": "/login", "value": "" }
            ]
        },
        {
            "id": "step-fill",
            "title": "Fill",
            "actions": [
                { "id": "action-fill", "type": "Type", "target": "#user", "value": "bob" }
            ]
        },
        {
            "id": "step-submit",
            "title": "Submit",
            "actions": [
                { "id": "action-submit", "type": "Click", "target": "#submit", "value": "" }
            ]
        }
    ])
}

async fn post_run(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/run")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn healthz_responds_ok() {
    let response = app(SimulatedExecutor::new())
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn run_returns_results_for_every_step() {
    let body = json!({ "title": "Login", "steps": login_steps() });

    let (status, payload) = post_run(app(SimulatedExecutor::new()), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["success"], true);
    let results = payload["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["stepId"], "step-nav");
    assert_eq!(results[0]["status"], "success");
    assert_eq!(results[2]["stepId"], "step-submit");
}

#[tokio::test]
async fn run_stops_at_the_first_failed_step() {
    let executor = SimulatedExecutor::new().fail_on(
        "#user",
        ExecError::NotFound("#user".into()),
    );
    let body = json!({ "steps": login_steps() });

    let (status, payload) = post_run(app(executor), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["success"], false);
    // The submit step was never attempted, so it is absent.
    let results = payload["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["status"], "success");
    assert_eq!(results[1]["stepId"], "step-fill");
    assert_eq!(results[1]["status"], "error");
    assert_eq!(results[1]["error"], "Element not found: #user");
}

#[tokio::test]
async fn run_rejects_an_empty_step_list() {
    let (status, payload) = post_run(app(SimulatedExecutor::new()), json!({ "steps": [] })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["error"], "no steps provided");
}

#[tokio::test]
async fn run_rejects_duplicate_step_ids() {
    let body = json!({
        "steps": [
            {
                "id": "step-1",
                "title": "Nav",
                "actions": [
                    { "id": "a-1", "type": "Navigate", "target": "/login", "value": "" }
                ]
            },
            {
                "id": "step-1",
                "title": "Nav twin",
                "actions": [
                    { "id": "a-2", "type": "Navigate", "target": "/login", "value": "" }
                ]
            }
        ]
    });

    let (status, payload) = post_run(app(SimulatedExecutor::new()), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(payload["error"]
        .as_str()
        .unwrap()
        .contains("Duplicate step id"));
}
