//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not authenticated")]
  Unauthenticated,

  #[error("{0}")]
  Forbidden(String),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Conflict(String),

  #[error("{0}")]
  Unprocessable(String),

  #[error("{0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<lyceum_core::Error> for ApiError {
  fn from(e: lyceum_core::Error) -> Self {
    use lyceum_core::Error as E;

    let message = e.to_string();
    match e {
      E::NotAuthenticated => Self::Unauthenticated,
      E::NotAuthorized(_) => Self::Forbidden(message),
      E::CourseNotFound(_) | E::LectureNotFound(_) => Self::NotFound(message),
      E::InvalidLectureKind { .. } => Self::Unprocessable(message),
      E::AlreadyEnrolled { .. } => Self::Conflict(message),
      E::Validation(_) => Self::BadRequest(message),
      E::Store(inner) => Self::Store(inner),
    }
  }
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
      ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if let ApiError::Store(e) = &self {
      tracing::error!(error = %e, "store failure");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
