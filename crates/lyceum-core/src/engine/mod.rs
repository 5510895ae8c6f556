//! [`Engine`]: the enrollment, progress, and grading rules.
//!
//! Every operation takes the caller as an explicit `Option<&Principal>`,
//! resolved once at the transport boundary. Operations that act on behalf of
//! a student fail with [`Error::NotAuthenticated`] when it is `None`.
//!
//! Operations that imply enrollment (completing a reading, submitting a quiz)
//! enroll the student idempotently as their first write, inside the same
//! store transaction as the rest of the operation.

mod catalog;
mod enrollment;
mod outline;
mod progress;
mod quiz;

use uuid::Uuid;

use crate::{
  Error, Result,
  course::Course,
  lecture::Lecture,
  store::CourseStore,
};

/// The course engine, generic over its storage backend.
///
/// Cloning is as cheap as cloning the store.
#[derive(Debug, Clone)]
pub struct Engine<S> {
  store: S,
}

impl<S: CourseStore> Engine<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  async fn course(&self, id: Uuid) -> Result<Course> {
    self
      .store
      .get_course(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::CourseNotFound(id))
  }

  async fn lecture(&self, id: Uuid) -> Result<Lecture> {
    self
      .store
      .get_lecture(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::LectureNotFound(id))
  }
}
