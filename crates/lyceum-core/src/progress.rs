//! Progress records and per-course aggregates.
//!
//! A progress record is the durable fact that a student completed a lecture.
//! Records are created on first completion, updated in place by later passing
//! quiz attempts, and never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
  pub student_id:   Uuid,
  pub course_id:    Uuid,
  pub lecture_id:   Uuid,
  pub completed:    bool,
  /// Best-known quiz score; `None` for readings.
  pub score:        Option<u8>,
  pub completed_at: DateTime<Utc>,
}

/// Aggregate progress of one student through one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseProgress {
  pub total_lectures:      u32,
  pub completed_lectures:  u32,
  /// `round(100 * completed / total)`, or 0 for an empty course.
  pub progress_percentage: u8,
  pub lecture_progress:    Vec<ProgressRecord>,
}

impl CourseProgress {
  pub fn tally(total_lectures: u32, lecture_progress: Vec<ProgressRecord>) -> Self {
    let completed_lectures =
      lecture_progress.iter().filter(|p| p.completed).count() as u32;

    Self {
      total_lectures,
      completed_lectures,
      progress_percentage: percentage(completed_lectures, total_lectures),
      lecture_progress,
    }
  }
}

/// `round(100 * part / whole)` with halves rounded up; 0 when `whole` is 0.
///
/// `part` is clamped to `whole`, so the result never exceeds 100.
pub fn percentage(part: u32, whole: u32) -> u8 {
  if whole == 0 {
    return 0;
  }
  let part = u64::from(part.min(whole));
  let whole = u64::from(whole);
  ((200 * part + whole) / (2 * whole)) as u8
}
