//! HTTP boundary
//!
//! `POST /api/execute` accepts `{code, language, input?}` and returns the
//! execution result with HTTP 200; compile and runtime errors are reported
//! in-band through the result's `error` field. Malformed requests get 400,
//! scratch-directory failures get 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::executor::{self, ExecutionRequest};
use crate::workspace;

#[derive(Debug, Deserialize)]
pub struct ExecutePayload {
    pub code: Option<String>,
    pub language: Option<String>,
    pub input: Option<String>,
}

/// Turn a payload into a request, rejecting missing or empty fields
fn build_request(payload: ExecutePayload) -> Option<ExecutionRequest> {
    match (payload.code, payload.language) {
        (Some(code), Some(language)) if !code.is_empty() && !language.is_empty() => {
            Some(ExecutionRequest {
                code,
                language,
                input: payload.input.unwrap_or_default(),
            })
        }
        _ => None,
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/api/execute", post(execute_code))
        .route("/health", get(health_check))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn execute_code(Json(payload): Json<ExecutePayload>) -> Response {
    let request = match build_request(payload) {
        Some(request) => request,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Code and language are required" })),
            )
                .into_response();
        }
    };

    if let Err(e) = workspace::ensure_scratch_root().await {
        error!("Code execution error: {:#}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Failed to execute code",
                "output": "",
                "stderr": format!("{:#}", e),
            })),
        )
            .into_response();
    }

    let result = executor::execute(&request).await;

    Json(result).into_response()
}
