use super::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::time::Duration;
use tower::ServiceExt; // for oneshot()

mod numbers;

/// Router with default settings and the given fetch budget
fn test_router(budget: Duration) -> Router {
    let mut config = Config::default();
    config.fetch.max_timeout = budget;
    router_with(config)
}

fn router_with(config: Config) -> Router {
    let aggregator = Arc::new(NumberAggregator::new(&config.fetch).unwrap());
    create_router(aggregator, Arc::new(config))
}

async fn send_get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_api_server_spawns_and_stops_on_cancel() {
    let mut config = Config::default();
    config.server.bind_address = "127.0.0.1:0".parse().unwrap(); // Port 0 = OS assigns a free port
    let config = Arc::new(config);
    let aggregator = Arc::new(NumberAggregator::new(&config.fetch).unwrap());

    let shutdown = CancellationToken::new();
    let api_handle = tokio::spawn(start_api_server(aggregator, config, shutdown.clone()));

    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown.cancel();

    let result = tokio::time::timeout(Duration::from_secs(5), api_handle)
        .await
        .expect("server should stop after cancellation")
        .unwrap();
    assert!(result.is_ok(), "server returned {result:?}");
}

#[tokio::test]
async fn test_bind_failure_is_reported() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let mut config = Config::default();
    config.server.bind_address = occupied.local_addr().unwrap();
    let config = Arc::new(config);
    let aggregator = Arc::new(NumberAggregator::new(&config.fetch).unwrap());

    let result = start_api_server(aggregator, config, CancellationToken::new()).await;
    assert!(matches!(result, Err(crate::Error::Io(_))), "got {result:?}");
}

#[tokio::test]
async fn test_cors_enabled() {
    let app = router_with(Config::default());

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers().contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let mut config = Config::default();
    config.server.cors_enabled = false;
    let app = router_with(config);

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        !response.headers().contains_key("access-control-allow-origin"),
        "CORS header should be absent when CORS is disabled"
    );
}

#[tokio::test]
async fn test_cors_specific_origin() {
    let mut config = Config::default();
    config.server.cors_origins = vec!["http://allowed.example".to_string()];
    let app = router_with(config);

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://allowed.example")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://allowed.example")
    );
}
