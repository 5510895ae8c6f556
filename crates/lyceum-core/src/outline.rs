//! Derived unlock and completion state for a course.
//!
//! Nothing here is persisted. The outline is recomputed from the ordered
//! lecture list and the student's progress records on every read.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  lecture::{Lecture, LectureKind},
  progress::ProgressRecord,
};

/// Whether the lecture at `index` may be opened, given the completion flags of
/// the course's lectures in order.
///
/// Index 0 is always open. Any later index is open only when the lecture
/// directly before it is completed.
pub fn can_access(completed: &[bool], index: usize) -> bool {
  match index {
    0 => true,
    k => completed.get(k - 1).copied().unwrap_or(false),
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LectureState {
  pub lecture_id: Uuid,
  pub title:      String,
  pub kind:       LectureKind,
  pub order:      u32,
  pub completed:  bool,
  pub accessible: bool,
  pub score:      Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOutline {
  pub course_id: Uuid,
  pub lectures:  Vec<LectureState>,
}

impl CourseOutline {
  /// Build the outline. `lectures` must already be sorted by `order`.
  pub fn build(
    course_id: Uuid,
    lectures: &[Lecture],
    records: &[ProgressRecord],
  ) -> Self {
    let by_lecture: HashMap<Uuid, &ProgressRecord> =
      records.iter().map(|r| (r.lecture_id, r)).collect();

    let completed: Vec<bool> = lectures
      .iter()
      .map(|l| by_lecture.get(&l.lecture_id).is_some_and(|r| r.completed))
      .collect();

    let lectures = lectures
      .iter()
      .enumerate()
      .map(|(i, l)| LectureState {
        lecture_id: l.lecture_id,
        title:      l.title.clone(),
        kind:       l.kind(),
        order:      l.order,
        completed:  completed[i],
        accessible: can_access(&completed, i),
        score:      by_lecture.get(&l.lecture_id).and_then(|r| r.score),
      })
      .collect();

    Self { course_id, lectures }
  }
}
