use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::dto::ErrorResponse;

/// Everything a request can fail with, mapped onto exactly one status code
/// each. Validation never touches the store; store and timeout failures are
/// logged in full and surfaced with a generic description.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Title and content are required")]
    MissingFields,

    #[error("Note not found")]
    NoteNotFound,

    #[error("database operation failed")]
    Store(#[from] tokio_postgres::Error),

    #[error("database operation timed out")]
    Timeout(#[from] tokio::time::error::Elapsed),
}

impl ApiError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields => StatusCode::BAD_REQUEST,
            Self::NoteNotFound => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Timeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Store(e) => tracing::error!("store operation failed: {e}"),
            Self::Timeout(e) => tracing::error!("store operation timed out: {e}"),
            Self::MissingFields | Self::NoteNotFound => {}
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}
