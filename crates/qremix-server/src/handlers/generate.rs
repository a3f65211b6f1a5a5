//! Completion endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use qremix_completion::{CompletionRequest, OperationTimer};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    models::{GenerateRequest, GenerateResponse},
    state::AppState,
};

/// Resolve a single suggestion for the editor state in the request body
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<Json<GenerateResponse>> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let timer = OperationTimer::start();
    info!(
        "Received completion request with prompt length: {}",
        request.prompt.len()
    );

    let response = state.engine.complete(&CompletionRequest::from(request));

    info!(
        "Completion generated in {:.2}ms",
        timer.elapsed_ms()
    );

    Ok(Json(GenerateResponse {
        suggestion: response.suggestion,
    }))
}
