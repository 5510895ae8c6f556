//! Handlers for lecture content and the student actions performed on it.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/courses/{id}/lectures` | Ordered. Quiz answers hidden from students |
//! | `POST` | `/courses/{id}/lectures` | Course instructor only. Body: `{"title":..,"content":{"kind":..}}` |
//! | `GET`  | `/lectures/{id}` | Quiz answers hidden from students |
//! | `POST` | `/lectures/{id}/complete` | Reading lectures only; idempotent |
//! | `POST` | `/lectures/{id}/quiz` | Body: `{"answers":[0,2,1]}` |
//! | `GET`  | `/lectures/{id}/attempts` | Caller's own attempts, oldest first |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use lyceum_core::{
  Engine,
  lecture::{LectureContent, LectureView, NewLecture},
  progress::ProgressRecord,
  quiz::{QuizAttempt, QuizResult},
  store::CourseStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{caller::Caller, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /courses/{id}/lectures`
pub async fn list<S>(
  State(engine): State<Arc<Engine<S>>>,
  caller: Caller,
  Path(course_id): Path<Uuid>,
) -> Result<Json<Vec<LectureView>>, ApiError>
where
  S: CourseStore,
{
  Ok(Json(engine.list_lectures(caller.principal(), course_id).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub title:   String,
  pub content: LectureContent,
}

/// `POST /courses/{id}/lectures`
///
/// The lecture is appended after the course's existing lectures.
pub async fn create<S>(
  State(engine): State<Arc<Engine<S>>>,
  caller: Caller,
  Path(course_id): Path<Uuid>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CourseStore,
{
  let input = NewLecture {
    course_id,
    title: body.title,
    content: body.content,
  };
  let lecture = engine.create_lecture(caller.principal(), input).await?;
  Ok((StatusCode::CREATED, Json(lecture)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /lectures/{id}`
pub async fn get_one<S>(
  State(engine): State<Arc<Engine<S>>>,
  caller: Caller,
  Path(id): Path<Uuid>,
) -> Result<Json<LectureView>, ApiError>
where
  S: CourseStore,
{
  Ok(Json(engine.get_lecture(caller.principal(), id).await?))
}

// ─── Complete reading ─────────────────────────────────────────────────────────

/// `POST /lectures/{id}/complete`
pub async fn complete<S>(
  State(engine): State<Arc<Engine<S>>>,
  caller: Caller,
  Path(id): Path<Uuid>,
) -> Result<Json<ProgressRecord>, ApiError>
where
  S: CourseStore,
{
  let record = engine
    .record_reading_completion(caller.principal(), id)
    .await?;
  Ok(Json(record))
}

// ─── Quiz ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct QuizBody {
  pub answers: Vec<u32>,
}

/// `POST /lectures/{id}/quiz`
///
/// Every submission is recorded as an attempt, passing or not.
pub async fn submit_quiz<S>(
  State(engine): State<Arc<Engine<S>>>,
  caller: Caller,
  Path(id): Path<Uuid>,
  Json(body): Json<QuizBody>,
) -> Result<Json<QuizResult>, ApiError>
where
  S: CourseStore,
{
  let result = engine
    .submit_quiz(caller.principal(), id, body.answers)
    .await?;
  Ok(Json(result))
}

/// `GET /lectures/{id}/attempts`
pub async fn attempts<S>(
  State(engine): State<Arc<Engine<S>>>,
  caller: Caller,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<QuizAttempt>>, ApiError>
where
  S: CourseStore,
{
  Ok(Json(engine.get_quiz_attempts(caller.principal(), id).await?))
}
