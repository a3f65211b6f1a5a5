//! Application state for the API server

use qremix_completion::CompletionEngine;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Application state shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    /// Completion engine, shared by every request
    pub engine: Arc<CompletionEngine>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(engine: Arc<CompletionEngine>) -> Self {
        Self {
            engine,
            start_time: std::time::Instant::now(),
        }
    }

    /// Build the engine described by `config`
    pub fn from_config(config: &ServerConfig) -> ServerResult<Self> {
        let engine = CompletionEngine::from_config(&config.engine)?;
        Ok(Self::new(Arc::new(engine)))
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
