//! API request and response models

use qremix_completion::{CacheStats, CompletionRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Raw prompt text
    pub prompt: String,
    /// Editor state around the cursor; any shape is accepted
    #[serde(rename = "promptData", default)]
    pub prompt_data: Value,
}

impl From<GenerateRequest> for CompletionRequest {
    fn from(request: GenerateRequest) -> Self {
        CompletionRequest::new(request.prompt, request.prompt_data)
    }
}

/// Completion response; an empty suggestion means none is available
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub suggestion: String,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Cache statistics, or just `enabled: false` when caching is off
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub enabled: bool,
    #[serde(flatten)]
    pub stats: Option<CacheStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit_rate: Option<f64>,
}

impl From<Option<CacheStats>> for CacheStatsResponse {
    fn from(stats: Option<CacheStats>) -> Self {
        Self {
            enabled: stats.is_some(),
            hit_rate: stats.as_ref().map(CacheStats::hit_rate),
            stats,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime: u64,
}
