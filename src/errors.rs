use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Why a dashboard fetch failed. Exposed as a cause code next to the
/// human-readable message; the page itself only renders the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureCause {
    Network,
    Protocol,
    Shape,
}

/// Failure of a single snapshot fetch. All variants collapse into the Failed
/// phase; none escapes past the fetch boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not reach the dashboard service: {0}")]
    Network(#[source] reqwest::Error),
    #[error("dashboard service returned status {0}")]
    Protocol(StatusCode),
    #[error("dashboard response did not match the expected shape: {0}")]
    Shape(#[source] serde_json::Error),
}

impl FetchError {
    pub fn cause(&self) -> FailureCause {
        match self {
            FetchError::Network(_) => FailureCause::Network,
            FetchError::Protocol(_) => FailureCause::Protocol,
            FetchError::Shape(_) => FailureCause::Shape,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
