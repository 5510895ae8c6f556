//! Course and lecture CRUD. Authoring is limited to instructors, and lectures
//! only to the instructor who owns the course.

use tracing::info;
use uuid::Uuid;

use super::Engine;
use crate::{
  Error, Result,
  course::{Course, CourseSummary, NewCourse},
  lecture::{Lecture, LectureView, NewLecture},
  principal::{Principal, require},
  store::CourseStore,
};

impl<S: CourseStore> Engine<S> {
  pub async fn create_course(
    &self,
    principal: Option<&Principal>,
    input: NewCourse,
  ) -> Result<Course> {
    let principal = require(principal)?;
    if !principal.is_instructor() {
      return Err(Error::NotAuthorized(
        "only instructors can create courses".into(),
      ));
    }
    input.validate()?;

    let course = self
      .store
      .add_course(principal.user_id, input)
      .await
      .map_err(Error::store)?;

    info!(course = %course.course_id, instructor = %principal.user_id, "course created");
    Ok(course)
  }

  pub async fn get_course(&self, course_id: Uuid) -> Result<Course> {
    self.course(course_id).await
  }

  pub async fn list_courses(&self) -> Result<Vec<Course>> {
    self.store.list_courses().await.map_err(Error::store)
  }

  /// The caller's own courses with their enrollment and lecture counts.
  /// Empty for a caller who teaches nothing.
  pub async fn instructor_courses(
    &self,
    principal: Option<&Principal>,
  ) -> Result<Vec<CourseSummary>> {
    let principal = require(principal)?;
    let courses = self
      .store
      .list_courses_by_instructor(principal.user_id)
      .await
      .map_err(Error::store)?;

    let mut summaries = Vec::with_capacity(courses.len());
    for course in courses {
      let enrollments = self
        .store
        .list_enrollments_for_course(course.course_id)
        .await
        .map_err(Error::store)?;
      let lectures = self
        .store
        .list_lectures(course.course_id)
        .await
        .map_err(Error::store)?;
      summaries.push(CourseSummary {
        course,
        enrollment_count: enrollments.len(),
        lecture_count: lectures.len(),
      });
    }
    Ok(summaries)
  }

  pub async fn create_lecture(
    &self,
    principal: Option<&Principal>,
    input: NewLecture,
  ) -> Result<Lecture> {
    let principal = require(principal)?;
    let course = self.course(input.course_id).await?;
    if course.instructor_id != principal.user_id {
      return Err(Error::NotAuthorized(format!(
        "only the instructor of course {} can add lectures",
        course.course_id
      )));
    }
    input.validate()?;

    let lecture = self.store.add_lecture(input).await.map_err(Error::store)?;

    info!(
      course = %lecture.course_id,
      lecture = %lecture.lecture_id,
      order = lecture.order,
      kind = %lecture.kind(),
      "lecture created"
    );
    Ok(lecture)
  }

  /// Fetch a lecture as `viewer` may see it.
  pub async fn get_lecture(
    &self,
    viewer: Option<&Principal>,
    lecture_id: Uuid,
  ) -> Result<LectureView> {
    Ok(self.lecture(lecture_id).await?.view_for(viewer))
  }

  /// A course's lectures in order, as `viewer` may see them.
  pub async fn list_lectures(
    &self,
    viewer: Option<&Principal>,
    course_id: Uuid,
  ) -> Result<Vec<LectureView>> {
    self.course(course_id).await?;
    let lectures = self
      .store
      .list_lectures(course_id)
      .await
      .map_err(Error::store)?;
    Ok(lectures.iter().map(|l| l.view_for(viewer)).collect())
  }
}
