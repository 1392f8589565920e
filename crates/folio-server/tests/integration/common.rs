use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use tokio::net::TcpListener;

use folio_server::config::ServerConfig;
use folio_server::routes;
use folio_server::state::AppState;

pub const EXAMPLE_PAGE: &str = r#"<html><head><title> My Page </title></head><body><h1>Hi</h1><p>A</p><a href="/x">Go</a><img src="/y.png"></body></html>"#;

pub struct TestApp {
    pub router: Router,
    /// Base URL of the fixture upstream, e.g. `http://127.0.0.1:41234`
    pub upstream: String,
}

/// Page with more of everything than a summary keeps.
pub fn busy_page() -> String {
    let mut html = String::from("<!doctype html><html><head></head><body>");
    for i in 0..12 {
        html.push_str(&format!("<h2>Section {i}</h2><p>Paragraph {i}</p>"));
    }
    for i in 0..8 {
        html.push_str(&format!(r#"<a href="https://example.org/{i}">Link {i}</a>"#));
    }
    for i in 0..6 {
        html.push_str(&format!(r#"<img src="/img/{i}.png">"#));
    }
    html.push_str("</body></html>");
    html
}

/// Serve fixture pages from an ephemeral local port.
async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/example", get(|| async { Html(EXAMPLE_PAGE) }))
        .route("/busy", get(|| async { Html(busy_page()) }))
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, "not here") }),
        );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upstream listener");
    let addr = listener.local_addr().expect("Failed to read upstream addr");
    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Upstream server failed");
    });

    format!("http://{addr}")
}

/// Build the full app (with middleware) against a fresh fixture upstream.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(ServerConfig::default()).await
}

pub async fn setup_test_app_with(config: ServerConfig) -> TestApp {
    let upstream = spawn_upstream().await;
    let state = AppState::from_config(&config).expect("Failed to build state");

    TestApp {
        router: routes::app(Arc::new(state), &config),
        upstream,
    }
}
