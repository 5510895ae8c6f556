//! Handlers for progress, completion and sequential-access queries.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/courses/{id}/progress` | Caller's progress summary |
//! | `GET`  | `/courses/{id}/outline` | Per-lecture completion and accessibility |
//! | `GET`  | `/courses/{id}/lectures/{index}/access` | `{"accessible":bool}`; index is 0-based |
//! | `GET`  | `/lectures/{id}/completed` | `{"completed":bool}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use lyceum_core::{
  Engine, outline::CourseOutline, progress::CourseProgress, store::CourseStore,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{caller::Caller, error::ApiError};

/// `GET /courses/{id}/progress`
pub async fn course<S>(
  State(engine): State<Arc<Engine<S>>>,
  caller: Caller,
  Path(course_id): Path<Uuid>,
) -> Result<Json<CourseProgress>, ApiError>
where
  S: CourseStore,
{
  let progress = engine
    .get_course_progress(caller.principal(), course_id)
    .await?;
  Ok(Json(progress))
}

/// `GET /courses/{id}/outline`
pub async fn outline<S>(
  State(engine): State<Arc<Engine<S>>>,
  caller: Caller,
  Path(course_id): Path<Uuid>,
) -> Result<Json<CourseOutline>, ApiError>
where
  S: CourseStore,
{
  Ok(Json(engine.course_outline(caller.principal(), course_id).await?))
}

#[derive(Debug, Serialize)]
pub struct Access {
  pub accessible: bool,
}

/// `GET /courses/{id}/lectures/{index}/access`
pub async fn access<S>(
  State(engine): State<Arc<Engine<S>>>,
  caller: Caller,
  Path((course_id, index)): Path<(Uuid, usize)>,
) -> Result<Json<Access>, ApiError>
where
  S: CourseStore,
{
  let accessible = engine
    .can_access_lecture(caller.principal(), course_id, index)
    .await?;
  Ok(Json(Access { accessible }))
}

#[derive(Debug, Serialize)]
pub struct Completed {
  pub completed: bool,
}

/// `GET /lectures/{id}/completed`
pub async fn completed<S>(
  State(engine): State<Arc<Engine<S>>>,
  caller: Caller,
  Path(lecture_id): Path<Uuid>,
) -> Result<Json<Completed>, ApiError>
where
  S: CourseStore,
{
  let completed = engine
    .is_lecture_completed(caller.principal(), lecture_id)
    .await?;
  Ok(Json(Completed { completed }))
}
