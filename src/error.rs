//! Application error type and its mapping onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::common::ErrorResponse;
use crate::services::record_store::StoreError;

/// Body returned for every failure the client cannot fix.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// The errors a request handler may end with.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A query parameter is missing or malformed.
    ///
    /// The message is returned to the client as-is.
    #[error("{0}")]
    Validation(String),

    /// The record store failed to read or write.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The seed source was unreachable, answered with a non-2xx status, or
    /// returned a body that is not a JSON array of records.
    #[error("could not fetch seed data: {0}")]
    UpstreamFetch(String),
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        AppError::UpstreamFetch(error.to_string())
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::UpstreamFetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Store and upstream details stay in the logs.
        let error = match self {
            AppError::Validation(message) => message,
            AppError::Store(_) | AppError::UpstreamFetch(_) => {
                INTERNAL_SERVER_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
