//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! This is where the engine taxonomy is translated to HTTP: missing
//! resources and out-of-range pages become 404, malformed input 400, and
//! business-rule conflicts 412 with the rule code verbatim in the body.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use kennsla_core::ServiceError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// Business-rule conflict; the code string is part of the contract.
  #[error("{0}")]
  Conflict(&'static str),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Translate an engine failure into its HTTP shape.
  pub fn from_service<E>(err: ServiceError<E>) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    match err {
      ServiceError::NotFound => {
        Self::NotFound("person or course instance not found".into())
      }
      ServiceError::InvalidPage(page) => {
        Self::BadRequest(format!("invalid page number: {page}"))
      }
      ServiceError::PageOutOfRange { page, page_count } => Self::NotFound(
        format!("page {page} out of range: only {page_count} page(s)"),
      ),
      ServiceError::Validation(code) => Self::Conflict(code.as_str()),
      ServiceError::Store(e) => Self::Store(Box::new(e)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(code) => {
        (StatusCode::PRECONDITION_FAILED, (*code).to_owned())
      }
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
