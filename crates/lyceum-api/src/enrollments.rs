//! Handlers for enrollment endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/courses/{id}/enroll` | 409 if already enrolled |
//! | `GET`  | `/courses/{id}/enrollment` | `{"enrolled":bool}` for the caller |
//! | `GET`  | `/courses/{id}/enrollments` | Course instructor only |
//! | `GET`  | `/courses/{id}/enrollments/count` | Public. `{"count":n}` |
//! | `GET`  | `/me/enrollments` | Caller's enrollments |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use lyceum_core::{Engine, enrollment::Enrollment, store::CourseStore};
use serde::Serialize;
use uuid::Uuid;

use crate::{caller::Caller, error::ApiError};

/// `POST /courses/{id}/enroll`
pub async fn enroll<S>(
  State(engine): State<Arc<Engine<S>>>,
  caller: Caller,
  Path(course_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CourseStore,
{
  let enrollment = engine.enroll(caller.principal(), course_id).await?;
  Ok((StatusCode::CREATED, Json(enrollment)))
}

#[derive(Debug, Serialize)]
pub struct EnrollmentStatus {
  pub enrolled: bool,
}

/// `GET /courses/{id}/enrollment`
pub async fn status<S>(
  State(engine): State<Arc<Engine<S>>>,
  caller: Caller,
  Path(course_id): Path<Uuid>,
) -> Result<Json<EnrollmentStatus>, ApiError>
where
  S: CourseStore,
{
  let enrolled = engine.is_enrolled(caller.principal(), course_id).await?;
  Ok(Json(EnrollmentStatus { enrolled }))
}

/// `GET /courses/{id}/enrollments`
pub async fn roster<S>(
  State(engine): State<Arc<Engine<S>>>,
  caller: Caller,
  Path(course_id): Path<Uuid>,
) -> Result<Json<Vec<Enrollment>>, ApiError>
where
  S: CourseStore,
{
  let enrollments = engine
    .list_enrollments_for_course(caller.principal(), course_id)
    .await?;
  Ok(Json(enrollments))
}

#[derive(Debug, Serialize)]
pub struct EnrollmentCount {
  pub count: usize,
}

/// `GET /courses/{id}/enrollments/count`
pub async fn count<S>(
  State(engine): State<Arc<Engine<S>>>,
  Path(course_id): Path<Uuid>,
) -> Result<Json<EnrollmentCount>, ApiError>
where
  S: CourseStore,
{
  let count = engine.enrollment_count(course_id).await?;
  Ok(Json(EnrollmentCount { count }))
}

/// `GET /me/enrollments`
pub async fn mine<S>(
  State(engine): State<Arc<Engine<S>>>,
  caller: Caller,
) -> Result<Json<Vec<Enrollment>>, ApiError>
where
  S: CourseStore,
{
  let enrollments = engine
    .list_enrollments_for_student(caller.principal())
    .await?;
  Ok(Json(enrollments))
}
