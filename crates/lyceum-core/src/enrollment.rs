//! Enrollment: the record that a student has joined a course.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// At most one enrollment exists per (student, course) pair; stores enforce
/// this with a uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
  pub student_id:  Uuid,
  pub course_id:   Uuid,
  pub enrolled_at: DateTime<Utc>,
}
