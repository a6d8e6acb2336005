//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Wraps the core taxonomy so every handler can use `?` on store results and
//! get the right status code: 401 Unauthenticated, 400 Validation,
//! 409 Conflict, 404 NotFound, 500 Storage. Error bodies are
//! `{"message": ...}`; storage details are logged, not leaked.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use stockroom_core::Error as CoreError;

/// An error returned by an API handler.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub CoreError);

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self.0 {
      CoreError::Unauthenticated => {
        (StatusCode::UNAUTHORIZED, "Invalid credentials.".to_owned())
      }
      CoreError::Validation(m) => (StatusCode::BAD_REQUEST, m),
      CoreError::Conflict(m) => (StatusCode::CONFLICT, m),
      CoreError::NotFound => (
        StatusCode::NOT_FOUND,
        "Item not found or user not authorized.".to_owned(),
      ),
      CoreError::Storage(detail) => {
        tracing::error!(%detail, "storage failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.".to_owned())
      }
    };
    (status, Json(json!({ "message": message }))).into_response()
  }
}
