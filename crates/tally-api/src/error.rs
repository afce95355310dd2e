//! Error types for tally-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// API error type
///
/// Each variant carries exactly the client-facing message of the wire
/// contract; storage detail is logged at the point of failure and never
/// reaches the response body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid amount value.")]
    InvalidAmount,

    #[error("Entry not found.")]
    EntryNotFound,

    #[error("{message}")]
    Storage { message: &'static str },
}

impl ApiError {
    /// Wrap a storage failure under the operation's generic message
    pub fn storage(message: &'static str, source: tally_core::StoreError) -> Self {
        log::error!(target: "tally::api", "{} ({})", message, source);
        ApiError::Storage { message }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidAmount => StatusCode::BAD_REQUEST,
            ApiError::EntryNotFound => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
