//! The enrollment ledger.
//!
//! Two ways in: [`Engine::ensure_enrolled`] is idempotent and is what content
//! access uses, while [`Engine::enroll`] is the deliberate user action and
//! rejects a duplicate.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use super::Engine;
use crate::{
  Error, Result,
  enrollment::Enrollment,
  principal::{Principal, require},
  store::CourseStore,
};

impl<S: CourseStore> Engine<S> {
  /// Return the caller's enrollment in `course_id`, creating it if needed.
  /// Safe to call on every access; only the first call writes.
  pub async fn ensure_enrolled(
    &self,
    principal: Option<&Principal>,
    course_id: Uuid,
  ) -> Result<Enrollment> {
    let principal = require(principal)?;
    self.course(course_id).await?;

    let enrollment = self
      .store
      .ensure_enrollment(principal.user_id, course_id, Utc::now())
      .await
      .map_err(Error::store)?;

    debug!(student = %principal.user_id, course = %course_id, "enrollment ensured");
    Ok(enrollment)
  }

  /// Enroll the caller in `course_id`. Fails with
  /// [`Error::AlreadyEnrolled`] if they already are.
  pub async fn enroll(
    &self,
    principal: Option<&Principal>,
    course_id: Uuid,
  ) -> Result<Enrollment> {
    let principal = require(principal)?;
    self.course(course_id).await?;

    let enrollment = self
      .store
      .insert_enrollment(principal.user_id, course_id, Utc::now())
      .await
      .map_err(Error::store)?
      .ok_or(Error::AlreadyEnrolled {
        student: principal.user_id,
        course:  course_id,
      })?;

    info!(student = %principal.user_id, course = %course_id, "enrolled");
    Ok(enrollment)
  }

  pub async fn is_enrolled(
    &self,
    principal: Option<&Principal>,
    course_id: Uuid,
  ) -> Result<bool> {
    let principal = require(principal)?;
    let enrollment = self
      .store
      .get_enrollment(principal.user_id, course_id)
      .await
      .map_err(Error::store)?;
    Ok(enrollment.is_some())
  }

  /// Every course the caller is enrolled in, in no particular order.
  pub async fn list_enrollments_for_student(
    &self,
    principal: Option<&Principal>,
  ) -> Result<Vec<Enrollment>> {
    let principal = require(principal)?;
    self
      .store
      .list_enrollments_for_student(principal.user_id)
      .await
      .map_err(Error::store)
  }

  /// Every enrollment in `course_id`. Only the course's instructor may list
  /// them.
  pub async fn list_enrollments_for_course(
    &self,
    principal: Option<&Principal>,
    course_id: Uuid,
  ) -> Result<Vec<Enrollment>> {
    let principal = require(principal)?;
    let course = self.course(course_id).await?;
    if course.instructor_id != principal.user_id {
      return Err(Error::NotAuthorized(format!(
        "only the instructor of course {course_id} can list its enrollments"
      )));
    }
    self
      .store
      .list_enrollments_for_course(course_id)
      .await
      .map_err(Error::store)
  }

  /// Number of students enrolled in `course_id`. Public.
  pub async fn enrollment_count(&self, course_id: Uuid) -> Result<usize> {
    self.course(course_id).await?;
    let enrollments = self
      .store
      .list_enrollments_for_course(course_id)
      .await
      .map_err(Error::store)?;
    Ok(enrollments.len())
  }
}
