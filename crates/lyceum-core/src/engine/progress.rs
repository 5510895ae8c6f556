//! The progress tracker: reading completion and per-course aggregates.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::Engine;
use crate::{
  Error, Result,
  lecture::LectureKind,
  principal::{Principal, require},
  progress::{CourseProgress, ProgressRecord},
  store::{CourseStore, ReadingCompletion},
};

impl<S: CourseStore> Engine<S> {
  /// Mark a reading lecture as done for the caller, enrolling them first.
  ///
  /// Idempotent: a repeat call returns the original record, timestamp
  /// included.
  pub async fn record_reading_completion(
    &self,
    principal: Option<&Principal>,
    lecture_id: Uuid,
  ) -> Result<ProgressRecord> {
    let principal = require(principal)?;
    let lecture = self.lecture(lecture_id).await?;
    lecture.expect_kind(LectureKind::Reading)?;

    let record = self
      .store
      .complete_reading(ReadingCompletion {
        student_id: principal.user_id,
        course_id:  lecture.course_id,
        lecture_id,
        at:         Utc::now(),
      })
      .await
      .map_err(Error::store)?;

    info!(
      student = %principal.user_id,
      lecture = %lecture_id,
      completed_at = %record.completed_at,
      "reading completed"
    );
    Ok(record)
  }

  pub async fn get_course_progress(
    &self,
    principal: Option<&Principal>,
    course_id: Uuid,
  ) -> Result<CourseProgress> {
    let principal = require(principal)?;
    self.course(course_id).await?;

    let lectures = self
      .store
      .list_lectures(course_id)
      .await
      .map_err(Error::store)?;
    let records = self
      .store
      .list_progress(principal.user_id, course_id)
      .await
      .map_err(Error::store)?;

    Ok(CourseProgress::tally(lectures.len() as u32, records))
  }
}
