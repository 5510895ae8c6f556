//! The progress aggregator: read-only unlock and completion state.

use uuid::Uuid;

use super::Engine;
use crate::{
  Error, Result,
  outline::{CourseOutline, can_access},
  principal::{Principal, require},
  store::CourseStore,
};

impl<S: CourseStore> Engine<S> {
  pub async fn is_lecture_completed(
    &self,
    principal: Option<&Principal>,
    lecture_id: Uuid,
  ) -> Result<bool> {
    let principal = require(principal)?;
    self.lecture(lecture_id).await?;
    let record = self
      .store
      .get_progress(principal.user_id, lecture_id)
      .await
      .map_err(Error::store)?;
    Ok(record.is_some_and(|r| r.completed))
  }

  /// Whether the caller may open the lecture at zero-based `index` in the
  /// course's order.
  pub async fn can_access_lecture(
    &self,
    principal: Option<&Principal>,
    course_id: Uuid,
    index: usize,
  ) -> Result<bool> {
    let outline = self.course_outline(principal, course_id).await?;
    let completed: Vec<bool> =
      outline.lectures.iter().map(|l| l.completed).collect();
    Ok(can_access(&completed, index))
  }

  pub async fn course_outline(
    &self,
    principal: Option<&Principal>,
    course_id: Uuid,
  ) -> Result<CourseOutline> {
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

    Ok(CourseOutline::build(course_id, &lectures, &records))
  }
}
