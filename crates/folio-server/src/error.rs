use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use folio_core::error::AppError;

use crate::dto::ErrorResponse;

/// Wrapper so we can implement `IntoResponse` for `AppError`.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::warn!(error = %self.0, "Scrape failed");
        }

        let body = ErrorResponse {
            error: self.0.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}
