use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use folio_server::config::ServerConfig;

use crate::integration::common::{setup_test_app, setup_test_app_with};

const INVALID_URL_BODY: &str = r#"{"error":"Please provide a valid URL in the request body."}"#;

fn scrape_request(body: impl Into<Body>) -> Request<Body> {
    Request::post("/scrape")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn scrape_returns_summary() {
    let app = setup_test_app().await;
    let body = serde_json::json!({ "url": format!("{}/example", app.upstream) });

    let response = app
        .router
        .oneshot(scrape_request(serde_json::to_vec(&body).unwrap()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        serde_json::json!({
            "title": "My Page",
            "headings": ["Hi"],
            "content_snippet": "A",
            "num_links": 1,
            "links": [{"text": "Go", "href": "/x"}],
            "num_images": 1,
            "image_urls": ["/y.png"],
        })
    );
}

#[tokio::test]
async fn scrape_truncates_samples_but_counts_everything() {
    let app = setup_test_app().await;
    let body = serde_json::json!({ "url": format!("{}/busy", app.upstream) });

    let response = app
        .router
        .oneshot(scrape_request(serde_json::to_vec(&body).unwrap()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["title"], "No title found");
    assert_eq!(json["headings"].as_array().unwrap().len(), 10);
    assert_eq!(json["headings"][9], "Section 9");
    assert_eq!(
        json["content_snippet"],
        "Paragraph 0 Paragraph 1 Paragraph 2"
    );
    assert_eq!(json["num_links"], 8);
    assert_eq!(json["links"].as_array().unwrap().len(), 5);
    assert_eq!(json["links"][0]["href"], "https://example.org/0");
    assert_eq!(json["num_images"], 6);
    assert_eq!(json["image_urls"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn upstream_404_returns_500_with_status_in_message() {
    let app = setup_test_app().await;
    let body = serde_json::json!({ "url": format!("{}/missing", app.upstream) });

    let response = app
        .router
        .oneshot(scrape_request(serde_json::to_vec(&body).unwrap()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = read_json(response).await;
    assert_eq!(json["error"], "Failed to fetch the page. Status code: 404");
}

#[tokio::test]
async fn unreachable_upstream_returns_500() {
    let app = setup_test_app().await;

    let response = app
        .router
        .oneshot(scrape_request(r#"{"url": "http://127.0.0.1:1/"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = read_json(response).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn invalid_bodies_return_400() {
    let app = setup_test_app().await;

    for body in ["{}", "not json", r#"{"url": 42}"#, r#"{"url": "  "}"#, "null", "[]"] {
        let response = app
            .router
            .clone()
            .oneshot(scrape_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes, INVALID_URL_BODY.as_bytes(), "body: {body}");
    }
}

#[tokio::test]
async fn missing_content_type_returns_400() {
    let app = setup_test_app().await;

    let response = app
        .router
        .oneshot(
            Request::post("/scrape")
                .body(Body::from(r#"{"url": "https://example.com"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = read_json(response).await;
    assert_eq!(
        json["error"],
        "Please provide a valid URL in the request body."
    );
}

#[tokio::test]
async fn only_post_scrape_is_routed() {
    let app = setup_test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(Request::get("/scrape").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = app
        .router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Middleware
// ---------------------------------------------------------------------------

fn oversized_body() -> Vec<u8> {
    let padding = "x".repeat(2048);
    serde_json::to_vec(&serde_json::json!({ "url": "https://example.com", "padding": padding }))
        .unwrap()
}

async fn small_limit_app() -> crate::integration::common::TestApp {
    setup_test_app_with(ServerConfig {
        max_request_bytes: 1024,
        ..ServerConfig::default()
    })
    .await
}

#[tokio::test]
async fn oversized_body_with_content_length_returns_413() {
    let app = small_limit_app().await;
    let body = oversized_body();

    let response = app
        .router
        .oneshot(
            Request::post("/scrape")
                .header("content-type", "application/json")
                .header("content-length", body.len())
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn oversized_body_without_content_length_returns_413() {
    let app = small_limit_app().await;

    let response = app
        .router
        .oneshot(scrape_request(oversized_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = read_json(response).await;
    assert_eq!(json["error"], "Request body is too large");
}

#[tokio::test]
async fn body_under_limit_is_accepted() {
    let app = small_limit_app().await;
    let body = serde_json::json!({ "url": format!("{}/example", app.upstream) });

    let response = app
        .router
        .oneshot(scrape_request(serde_json::to_vec(&body).unwrap()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn cors_headers_are_applied() {
    let app = setup_test_app().await;
    let body = serde_json::json!({ "url": format!("{}/example", app.upstream) });

    let response = app
        .router
        .oneshot(
            Request::post("/scrape")
                .header("content-type", "application/json")
                .header("origin", "https://portfolio.example")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}
