use super::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_sources() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/primes"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"numbers": [2, 3, 5, 7, 11, 13]})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fibo"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"numbers": [1, 1, 2, 3, 5, 8, 13, 21]})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"numbers": [1000]}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    mock_server
}

#[tokio::test]
async fn test_numbers_merges_upstream_lists() {
    let mock_server = mock_sources().await;
    let uri = format!(
        "/numbers?u={0}/primes&u={0}/fibo",
        mock_server.uri()
    );

    let (status, body) = send_get(test_router(Duration::from_millis(500)), &uri).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json, json!({"numbers": [1, 2, 3, 5, 7, 8, 11, 13, 21]}));
}

#[tokio::test]
async fn test_numbers_ignores_invalid_candidates() {
    let mock_server = mock_sources().await;
    let uri = format!(
        "/numbers?u=foo@bar.com&u=example.com&u={}/primes&u=ftp://example.com/foo/bar&u=dolor",
        mock_server.uri()
    );

    let (status, body) = send_get(test_router(Duration::from_millis(500)), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"numbers":[2,3,5,7,11,13]}"#);
}

#[tokio::test]
async fn test_numbers_without_parameters_is_empty() {
    let (status, body) = send_get(test_router(Duration::from_millis(500)), "/numbers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"numbers":[]}"#);
}

#[tokio::test]
async fn test_numbers_when_every_upstream_fails_is_still_ok() {
    let mock_server = mock_sources().await;
    let uri = format!(
        "/numbers?u={0}/slow&u={0}/missing",
        mock_server.uri()
    );

    let (status, body) = send_get(test_router(Duration::from_millis(200)), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"numbers":[]}"#);
}

#[tokio::test]
async fn test_numbers_drops_only_the_late_upstream() {
    let mock_server = mock_sources().await;
    let uri = format!(
        "/numbers?u={0}/fibo&u={0}/slow",
        mock_server.uri()
    );

    let (status, body) = send_get(test_router(Duration::from_millis(300)), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"numbers":[1,2,3,5,8,13,21]}"#);
}

#[tokio::test]
async fn test_numbers_response_is_json() {
    let app = test_router(Duration::from_millis(500));

    let response = app
        .oneshot(Request::builder().uri("/numbers").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(content_type.starts_with("application/json"), "got {content_type}");
}
