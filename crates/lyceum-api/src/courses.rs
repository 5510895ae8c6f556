//! Handlers for `/courses` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/courses` | Public |
//! | `POST` | `/courses` | Instructors only. Body: `{"title":"..."}` |
//! | `GET`  | `/courses/{id}` | Public. 404 if not found |
//! | `GET`  | `/me/courses` | Courses the caller teaches, with counts |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use lyceum_core::{
  Engine,
  course::{Course, CourseSummary, NewCourse},
  store::CourseStore,
};
use uuid::Uuid;

use crate::{caller::Caller, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /courses`
pub async fn list<S>(
  State(engine): State<Arc<Engine<S>>>,
) -> Result<Json<Vec<Course>>, ApiError>
where
  S: CourseStore,
{
  Ok(Json(engine.list_courses().await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /courses`
pub async fn create<S>(
  State(engine): State<Arc<Engine<S>>>,
  caller: Caller,
  Json(body): Json<NewCourse>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CourseStore,
{
  let course = engine.create_course(caller.principal(), body).await?;
  Ok((StatusCode::CREATED, Json(course)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /courses/{id}`
pub async fn get_one<S>(
  State(engine): State<Arc<Engine<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Course>, ApiError>
where
  S: CourseStore,
{
  Ok(Json(engine.get_course(id).await?))
}

// ─── Taught by caller ─────────────────────────────────────────────────────────

/// `GET /me/courses`
pub async fn mine<S>(
  State(engine): State<Arc<Engine<S>>>,
  caller: Caller,
) -> Result<Json<Vec<CourseSummary>>, ApiError>
where
  S: CourseStore,
{
  Ok(Json(engine.instructor_courses(caller.principal()).await?))
}
