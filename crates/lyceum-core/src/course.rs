//! Course: the container that owns an ordered list of lectures.
//!
//! Course storage is a plain CRUD concern; the engine only needs to know that
//! a course exists and who teaches it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
  pub course_id:     Uuid,
  pub title:         String,
  pub description:   String,
  pub instructor_id: Uuid,
  pub created_at:    DateTime<Utc>,
  pub image_url:     Option<String>,
  pub category:      Option<String>,
}

/// Input to [`crate::store::CourseStore::add_course`].
/// `course_id` and `created_at` are assigned by the store; the instructor is
/// always the creating principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourse {
  pub title:       String,
  #[serde(default)]
  pub description: String,
  pub image_url:   Option<String>,
  pub category:    Option<String>,
}

impl NewCourse {
  pub fn validate(&self) -> Result<()> {
    if self.title.trim().is_empty() {
      return Err(Error::Validation("course title must not be blank".into()));
    }
    Ok(())
  }
}

/// A course as shown on its instructor's dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
  #[serde(flatten)]
  pub course:           Course,
  pub enrollment_count: usize,
  pub lecture_count:    usize,
}
