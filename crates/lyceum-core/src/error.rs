//! Error types for `lyceum-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::lecture::LectureKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("not authenticated")]
  NotAuthenticated,

  #[error("not authorized: {0}")]
  NotAuthorized(String),

  #[error("course not found: {0}")]
  CourseNotFound(Uuid),

  #[error("lecture not found: {0}")]
  LectureNotFound(Uuid),

  /// The lecture cannot serve as an `expected` lecture: it is the other kind,
  /// or it is a quiz without questions.
  #[error("lecture {lecture} is not a usable {expected} lecture: {reason}")]
  InvalidLectureKind {
    lecture:  Uuid,
    expected: LectureKind,
    reason:   String,
  },

  #[error("student {student} is already enrolled in course {course}")]
  AlreadyEnrolled { student: Uuid, course: Uuid },

  #[error("validation error: {0}")]
  Validation(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error. Used as `.map_err(Error::store)`.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  /// Whether this error means a referenced course or lecture is absent.
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::CourseNotFound(_) | Self::LectureNotFound(_))
  }

  pub fn is_invalid_lecture_kind(&self) -> bool {
    matches!(self, Self::InvalidLectureKind { .. })
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
