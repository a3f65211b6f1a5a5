//! Request logging middleware

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::{Duration, Instant};

const SLOW_REQUEST: Duration = Duration::from_millis(100);

/// Request logging middleware
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    tracing::debug!("Request: {} {}", method, uri);

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    if duration > SLOW_REQUEST {
        tracing::warn!("Slow request: {} {} took {:?}", method, uri, duration);
    }

    tracing::info!(
        "Response: {} {} - {} in {:.2}ms",
        method,
        uri,
        response.status(),
        duration.as_secs_f64() * 1000.0
    );

    response
}
