//! API route definitions

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::ServerConfig,
    handlers::{cache, generate, health},
    middleware::logging::logging_middleware,
    state::AppState,
};

/// API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/generate", post(generate::generate))
        .route("/cache/clear", post(cache::clear_cache))
        .route("/cache/stats", get(cache::cache_stats))
}

/// CORS policy: any origin when `origins` is empty, otherwise only the listed ones
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Fully layered application
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    api_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(logging_middleware))
                .layer(cors_layer(&config.cors_allowed_origins)),
        )
        .with_state(state)
}
