//! The `CourseStore` trait and the write batches it commits atomically.
//!
//! The trait is implemented by storage backends (e.g. `lyceum-store-sqlite`).
//! The [`Engine`](crate::Engine) owns the rules; the store owns durability,
//! uniqueness, and atomicity.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  course::{Course, NewCourse},
  enrollment::Enrollment,
  lecture::{Lecture, NewLecture},
  progress::ProgressRecord,
  quiz::QuizAttempt,
};

// ─── Write batches ───────────────────────────────────────────────────────────

/// A reading lecture marked as done by a student.
#[derive(Debug, Clone)]
pub struct ReadingCompletion {
  pub student_id: Uuid,
  pub course_id:  Uuid,
  pub lecture_id: Uuid,
  pub at:         DateTime<Utc>,
}

/// A graded quiz submission ready to be persisted.
#[derive(Debug, Clone)]
pub struct QuizSubmission {
  /// The course the quiz lecture belongs to; the student is enrolled in it.
  pub course_id: Uuid,
  pub attempt:   QuizAttempt,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Lyceum storage backend.
///
/// Uniqueness invariants are the store's responsibility: one enrollment per
/// (student, course) and one progress record per (student, lecture). Every
/// method that writes more than one row must do so in a single transaction,
/// so that concurrent calls for the same student cannot interleave between
/// the existence check and the write.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CourseStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Catalog ───────────────────────────────────────────────────────────

  /// Create and persist a new course taught by `instructor_id`.
  fn add_course(
    &self,
    instructor_id: Uuid,
    input: NewCourse,
  ) -> impl Future<Output = Result<Course, Self::Error>> + Send + '_;

  /// Retrieve a course by UUID. Returns `None` if not found.
  fn get_course(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Course>, Self::Error>> + Send + '_;

  fn list_courses(
    &self,
  ) -> impl Future<Output = Result<Vec<Course>, Self::Error>> + Send + '_;

  /// Courses taught by `instructor_id`, oldest first.
  fn list_courses_by_instructor(
    &self,
    instructor_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Course>, Self::Error>> + Send + '_;

  /// Append a lecture to its course. The store assigns `order` as one more
  /// than the number of lectures already in the course.
  fn add_lecture(
    &self,
    input: NewLecture,
  ) -> impl Future<Output = Result<Lecture, Self::Error>> + Send + '_;

  /// Retrieve a lecture by UUID. Returns `None` if not found.
  fn get_lecture(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Lecture>, Self::Error>> + Send + '_;

  /// All lectures of a course, sorted by `order` ascending.
  fn list_lectures(
    &self,
    course_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Lecture>, Self::Error>> + Send + '_;

  // ── Enrollment ledger ─────────────────────────────────────────────────

  /// Return the enrollment for (student, course), creating it with
  /// `enrolled_at = at` if absent. An existing record is returned unchanged.
  fn ensure_enrollment(
    &self,
    student_id: Uuid,
    course_id: Uuid,
    at: DateTime<Utc>,
  ) -> impl Future<Output = Result<Enrollment, Self::Error>> + Send + '_;

  /// Create the enrollment for (student, course). Returns `None`, and writes
  /// nothing, if one already exists.
  fn insert_enrollment(
    &self,
    student_id: Uuid,
    course_id: Uuid,
    at: DateTime<Utc>,
  ) -> impl Future<Output = Result<Option<Enrollment>, Self::Error>> + Send + '_;

  fn get_enrollment(
    &self,
    student_id: Uuid,
    course_id: Uuid,
  ) -> impl Future<Output = Result<Option<Enrollment>, Self::Error>> + Send + '_;

  fn list_enrollments_for_student(
    &self,
    student_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Enrollment>, Self::Error>> + Send + '_;

  fn list_enrollments_for_course(
    &self,
    course_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Enrollment>, Self::Error>> + Send + '_;

  // ── Progress ──────────────────────────────────────────────────────────

  /// In one transaction: ensure the enrollment, then insert a completed
  /// progress record unless one already exists. Returns the record as stored,
  /// which is the pre-existing one on a repeated call.
  fn complete_reading(
    &self,
    input: ReadingCompletion,
  ) -> impl Future<Output = Result<ProgressRecord, Self::Error>> + Send + '_;

  /// In one transaction: ensure the enrollment, append the attempt, and, if
  /// the attempt passed, upsert the progress record with its score and
  /// timestamp. Returns the progress record after the write, if any.
  fn record_quiz_submission(
    &self,
    input: QuizSubmission,
  ) -> impl Future<Output = Result<Option<ProgressRecord>, Self::Error>> + Send + '_;

  fn get_progress(
    &self,
    student_id: Uuid,
    lecture_id: Uuid,
  ) -> impl Future<Output = Result<Option<ProgressRecord>, Self::Error>> + Send + '_;

  /// Every progress record of a student within a course.
  fn list_progress(
    &self,
    student_id: Uuid,
    course_id: Uuid,
  ) -> impl Future<Output = Result<Vec<ProgressRecord>, Self::Error>> + Send + '_;

  /// A student's attempts at one quiz, oldest first.
  fn list_quiz_attempts(
    &self,
    student_id: Uuid,
    lecture_id: Uuid,
  ) -> impl Future<Output = Result<Vec<QuizAttempt>, Self::Error>> + Send + '_;
}
