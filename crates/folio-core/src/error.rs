use thiserror::Error;

/// Application-wide error types for Folio.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body did not carry a usable URL.
    #[error("{0}")]
    ValidationError(String),

    /// Request body exceeded the configured size limit.
    #[error("Request body is too large")]
    BodyTooLarge,

    /// Upstream answered with a non-success status code.
    #[error("Failed to fetch the page. Status code: {0}")]
    HttpStatus(u16),

    /// HTTP request failed (fetching a page).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Fetched document could not be processed as HTML.
    #[error("Failed to parse the page: {0}")]
    ParseError(String),

    /// Invalid environment or command-line configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AppError {
    /// Returns true if the error happened while fetching the page.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            AppError::HttpStatus(_)
                | AppError::HttpError(_)
                | AppError::NetworkError(_)
                | AppError::Timeout(_)
        )
    }

    /// Upstream status code, if the fetch got that far.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            AppError::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }
}
