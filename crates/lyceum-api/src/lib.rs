//! JSON REST API for Lyceum.
//!
//! Exposes an axum [`Router`] backed by an [`Engine`] over any
//! [`CourseStore`]. Authentication, TLS, and transport concerns are the
//! caller's responsibility: whoever mounts this router must place the resolved
//! [`Principal`](lyceum_core::principal::Principal) in the request extensions
//! (see [`Caller`]).
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", lyceum_api::api_router(engine.clone()))
//! ```

pub mod caller;
pub mod courses;
pub mod enrollments;
pub mod error;
pub mod lectures;
pub mod progress;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use lyceum_core::{Engine, store::CourseStore};

pub use caller::Caller;
pub use error::ApiError;

/// Build a fully-materialised API router for `engine`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(engine: Arc<Engine<S>>) -> Router<()>
where
  S: CourseStore + 'static,
{
  Router::new()
    // Courses
    .route("/courses", get(courses::list::<S>).post(courses::create::<S>))
    .route("/courses/{id}", get(courses::get_one::<S>))
    .route(
      "/courses/{id}/lectures",
      get(lectures::list::<S>).post(lectures::create::<S>),
    )
    // Enrollment
    .route("/courses/{id}/enroll", post(enrollments::enroll::<S>))
    .route("/courses/{id}/enrollment", get(enrollments::status::<S>))
    .route("/courses/{id}/enrollments", get(enrollments::roster::<S>))
    .route("/courses/{id}/enrollments/count", get(enrollments::count::<S>))
    .route("/me/courses", get(courses::mine::<S>))
    .route("/me/enrollments", get(enrollments::mine::<S>))
    // Progress
    .route("/courses/{id}/progress", get(progress::course::<S>))
    .route("/courses/{id}/outline", get(progress::outline::<S>))
    .route(
      "/courses/{id}/lectures/{index}/access",
      get(progress::access::<S>),
    )
    // Lectures
    .route("/lectures/{id}", get(lectures::get_one::<S>))
    .route("/lectures/{id}/complete", post(lectures::complete::<S>))
    .route("/lectures/{id}/quiz", post(lectures::submit_quiz::<S>))
    .route("/lectures/{id}/attempts", get(lectures::attempts::<S>))
    .route("/lectures/{id}/completed", get(progress::completed::<S>))
    .with_state(engine)
}
