use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo};
use serde_json::json;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_get_reports_query_and_headers() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/echo?id=5&tag=a&tag=b")
                .header("X-Trace", "abc")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/echo");
    assert_eq!(
        echo.query,
        vec![
            ("id".to_string(), "5".to_string()),
            ("tag".to_string(), "a".to_string()),
            ("tag".to_string(), "b".to_string()),
        ]
    );
    assert_eq!(echo.headers["x-trace"], "abc");
    assert_eq!(echo.body, serde_json::Value::Null);
}

#[tokio::test]
async fn echo_post_parses_json_body() {
    let resp = app()
        .oneshot(json_request("POST", "/echo", r#"{"item_id":3}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.body, json!({"item_id": 3}));
    assert_eq!(echo.headers["content-type"], "application/json");
}

#[tokio::test]
async fn echo_accepts_every_supported_method() {
    for method in ["GET", "POST", "PUT", "PATCH", "DELETE"] {
        let resp = app().oneshot(empty_request(method, "/echo")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{method}");
        let echo: Echo = body_json(resp).await;
        assert_eq!(echo.method, method);
    }
}

#[tokio::test]
async fn echo_rejects_other_methods() {
    let resp = app().oneshot(empty_request("OPTIONS", "/echo")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn echo_ids_are_unique() {
    let first: Echo = body_json(app().oneshot(empty_request("GET", "/echo")).await.unwrap()).await;
    let second: Echo = body_json(app().oneshot(empty_request("GET", "/echo")).await.unwrap()).await;
    assert_ne!(first.id, second.id);
}

// --- delay ---

#[tokio::test]
async fn delay_answers_after_sleeping() {
    let started = std::time::Instant::now();
    let resp = app().oneshot(empty_request("GET", "/delay/50")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(started.elapsed() >= std::time::Duration::from_millis(50));
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["delayedMs"], 50);
}

#[tokio::test]
async fn delay_bad_millis_returns_400() {
    let resp = app().oneshot(empty_request("GET", "/delay/soon")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- status ---

#[tokio::test]
async fn status_returns_requested_code() {
    let resp = app().oneshot(empty_request("DELETE", "/status/404")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn status_out_of_range_returns_400() {
    let resp = app().oneshot(empty_request("GET", "/status/99")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
