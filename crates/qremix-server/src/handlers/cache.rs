//! Cache control endpoints

use axum::{extract::State, Json};
use tracing::info;

use crate::{
    models::{CacheStatsResponse, MessageResponse},
    state::AppState,
};

/// Drop every memoized suggestion
pub async fn clear_cache(State(state): State<AppState>) -> Json<MessageResponse> {
    state.engine.clear_cache();
    info!("Completion cache cleared");

    Json(MessageResponse {
        message: "Completion cache cleared".to_string(),
    })
}

pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(CacheStatsResponse::from(state.engine.cache_stats()))
}
