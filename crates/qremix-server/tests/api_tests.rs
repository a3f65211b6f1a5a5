/// HTTP-level tests for the completion API
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use qremix_completion::EngineConfig;
use qremix_server::{ApiServer, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

fn router_with(config: ServerConfig) -> Router {
    ApiServer::new(config).unwrap().router()
}

fn router() -> Router {
    router_with(ServerConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_generate_keyword_prefix() {
    let app = router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/generate",
        Some(json!({ "prompt": "", "promptData": { "currentWord": "pay" } })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "suggestion": "payable " }));
}

#[tokio::test]
async fn test_generate_parameter_list() {
    let app = router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/generate",
        Some(json!({
            "prompt": "function transfer(",
            "promptData": { "wordBeforeCursor": "function transfer(", "isFunction": true }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestion"], "address recipient, uint256 amount");
}

#[tokio::test]
async fn test_generate_no_suggestion() {
    let app = router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/generate",
        Some(json!({ "prompt": "xyz", "promptData": { "wordBeforeCursor": "xyz123" } })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestion"], "");
}

#[tokio::test]
async fn test_generate_tolerates_loose_prompt_data() {
    let app = router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/generate",
        Some(json!({
            "prompt": "",
            "promptData": { "cursorPosition": -3, "currentWord": 7, "wordBeforeCursor": "address " }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestion"], "public owner");

    let (status, body) = send(&app, Method::POST, "/generate", Some(json!({ "prompt": "" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestion"], "");
}

#[tokio::test]
async fn test_generate_missing_prompt_is_bad_request() {
    let app = router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/generate",
        Some(json!({ "promptData": {} })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "bad_request");
}

#[tokio::test]
async fn test_generate_malformed_json_is_bad_request() {
    let app = router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"prompt\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cache_stats_and_clear() {
    let app = router();
    let request = json!({ "prompt": "p", "promptData": { "currentWord": "addr" } });

    send(&app, Method::POST, "/generate", Some(request.clone())).await;
    send(&app, Method::POST, "/generate", Some(request)).await;

    let (status, stats) = send(&app, Method::GET, "/cache/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["enabled"], true);
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["misses"], 1);
    assert_eq!(stats["entry_count"], 1);
    assert_eq!(stats["capacity"], 500);
    assert_eq!(stats["hit_rate"], 50.0);

    let (status, body) = send(&app, Method::POST, "/cache/clear", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Completion cache cleared" }));

    let (_, stats) = send(&app, Method::GET, "/cache/stats", None).await;
    assert_eq!(stats["entry_count"], 0);
    assert_eq!(stats["clears"], 1);
}

#[tokio::test]
async fn test_cache_disabled() {
    let app = router_with(ServerConfig {
        engine: EngineConfig::without_cache(),
        ..ServerConfig::default()
    });

    let (status, stats) = send(&app, Method::GET, "/cache/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats, json!({ "enabled": false }));

    let (status, _) = send(&app, Method::POST, "/cache/clear", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let app = router();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptime"].is_u64());
}

#[tokio::test]
async fn test_permissive_cors_by_default() {
    let app = router();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header(header::ORIGIN, "http://editor.example")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_configured_cors_origins() {
    let app = router_with(ServerConfig {
        cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        ..ServerConfig::default()
    });

    let allowed = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(allowed).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );

    let denied = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header(header::ORIGIN, "http://elsewhere.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(denied).await.unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn test_unknown_route() {
    let app = router();
    let (status, _) = send(&app, Method::GET, "/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
