//! Error type for `lyceum-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored value that does not map back onto a domain type.
  #[error("corrupt row: {0}")]
  Decode(String),

  /// A progress record that should exist after a write was not found.
  #[error("progress record missing after write for lecture {0}")]
  MissingProgress(uuid::Uuid),

  /// An enrollment that should exist after a write was not found.
  #[error("enrollment missing after write for course {0}")]
  MissingEnrollment(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
