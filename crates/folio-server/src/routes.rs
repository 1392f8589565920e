use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use folio_core::AppError;

use crate::config::ServerConfig;
use crate::dto::{INVALID_URL_MESSAGE, ScrapeRequest, ScrapeResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Build the router. `/scrape` is the only route.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/scrape", post(scrape))
        .with_state(state)
}

/// Build the router with the middleware stack the server runs with:
/// request body limit, HTTP tracing, and permissive CORS.
pub fn app(state: Arc<AppState>, config: &ServerConfig) -> Router {
    router(state)
        .layer(RequestBodyLimitLayer::new(config.max_request_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ---------------------------------------------------------------------------
// Scrape
// ---------------------------------------------------------------------------

/// Fetch the requested page and return its summary.
///
/// Any body that does not deserialize into a [`ScrapeRequest`] (not JSON,
/// wrong content type, missing or non-string `url`) gets the same 400,
/// except bodies cut off by the size limit, which get a 413.
pub async fn scrape(
    State(state): State<Arc<AppState>>,
    payload: Result<axum::Json<ScrapeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let axum::Json(body) = payload.map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected scrape request body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::BodyTooLarge
        } else {
            AppError::ValidationError(INVALID_URL_MESSAGE.to_string())
        }
    })?;
    let url = body.validated_url()?;

    let summary = state.service.summarize(url).await?;

    Ok(axum::Json(ScrapeResponse::from(summary)))
}
