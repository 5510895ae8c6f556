//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with fixed microsecond precision
//! and a `Z` suffix, so that lexical order is chronological order. Lecture
//! content and quiz answers are stored as compact JSON. UUIDs are stored as
//! hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use lyceum_core::{
  course::Course,
  enrollment::Enrollment,
  lecture::{Lecture, LectureContent, LectureKind},
  progress::ProgressRecord,
  quiz::QuizAttempt,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// Drop precision the column cannot hold, so a value survives a round trip
/// unchanged.
pub fn truncate_dt(dt: DateTime<Utc>) -> DateTime<Utc> { dt.trunc_subsecs(6) }

pub fn now() -> DateTime<Utc> { truncate_dt(Utc::now()) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── LectureKind ─────────────────────────────────────────────────────────────

pub fn encode_lecture_kind(k: LectureKind) -> &'static str { k.as_str() }

pub fn decode_lecture_kind(s: &str) -> Result<LectureKind> {
  match s {
    "reading" => Ok(LectureKind::Reading),
    "quiz" => Ok(LectureKind::Quiz),
    other => Err(Error::Decode(format!("unknown lecture kind: {other:?}"))),
  }
}

// ─── LectureContent ──────────────────────────────────────────────────────────

pub fn encode_content(c: &LectureContent) -> Result<String> {
  Ok(serde_json::to_string(c)?)
}

pub fn decode_content(s: &str) -> Result<LectureContent> {
  Ok(serde_json::from_str(s)?)
}

// ─── Answers ─────────────────────────────────────────────────────────────────

pub fn encode_answers(answers: &[u32]) -> Result<String> {
  Ok(serde_json::to_string(answers)?)
}

pub fn decode_answers(s: &str) -> Result<Vec<u32>> { Ok(serde_json::from_str(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `courses` row.
pub struct RawCourse {
  pub course_id:     String,
  pub title:         String,
  pub description:   String,
  pub instructor_id: String,
  pub created_at:    String,
  pub image_url:     Option<String>,
  pub category:      Option<String>,
}

pub const COURSE_COLUMNS: &str =
  "course_id, title, description, instructor_id, created_at, image_url, category";

impl RawCourse {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      course_id:     row.get(0)?,
      title:         row.get(1)?,
      description:   row.get(2)?,
      instructor_id: row.get(3)?,
      created_at:    row.get(4)?,
      image_url:     row.get(5)?,
      category:      row.get(6)?,
    })
  }

  pub fn into_course(self) -> Result<Course> {
    Ok(Course {
      course_id:     decode_uuid(&self.course_id)?,
      title:         self.title,
      description:   self.description,
      instructor_id: decode_uuid(&self.instructor_id)?,
      created_at:    decode_dt(&self.created_at)?,
      image_url:     self.image_url,
      category:      self.category,
    })
  }
}

/// Raw values read directly from a `lectures` row.
pub struct RawLecture {
  pub lecture_id:   String,
  pub course_id:    String,
  pub title:        String,
  pub kind:         String,
  pub order:        u32,
  pub content_json: String,
}

pub const LECTURE_COLUMNS: &str =
  "lecture_id, course_id, title, kind, ord, content_json";

impl RawLecture {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      lecture_id:   row.get(0)?,
      course_id:    row.get(1)?,
      title:        row.get(2)?,
      kind:         row.get(3)?,
      order:        row.get(4)?,
      content_json: row.get(5)?,
    })
  }

  pub fn into_lecture(self) -> Result<Lecture> {
    let lecture_id = decode_uuid(&self.lecture_id)?;
    let kind = decode_lecture_kind(&self.kind)?;
    let content = decode_content(&self.content_json)?;

    // The kind column is denormalised from the content for filtering.
    if content.kind() != kind {
      return Err(Error::Decode(format!(
        "lecture {lecture_id}: kind column {kind} disagrees with content"
      )));
    }

    Ok(Lecture {
      lecture_id,
      course_id: decode_uuid(&self.course_id)?,
      title: self.title,
      order: self.order,
      content,
    })
  }
}

/// Raw values read directly from an `enrollments` row.
pub struct RawEnrollment {
  pub student_id:  String,
  pub course_id:   String,
  pub enrolled_at: String,
}

pub const ENROLLMENT_COLUMNS: &str = "student_id, course_id, enrolled_at";

impl RawEnrollment {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      student_id:  row.get(0)?,
      course_id:   row.get(1)?,
      enrolled_at: row.get(2)?,
    })
  }

  pub fn into_enrollment(self) -> Result<Enrollment> {
    Ok(Enrollment {
      student_id:  decode_uuid(&self.student_id)?,
      course_id:   decode_uuid(&self.course_id)?,
      enrolled_at: decode_dt(&self.enrolled_at)?,
    })
  }
}

/// Raw values read directly from a `progress` row.
pub struct RawProgress {
  pub student_id:   String,
  pub course_id:    String,
  pub lecture_id:   String,
  pub completed:    bool,
  pub score:        Option<u8>,
  pub completed_at: String,
}

pub const PROGRESS_COLUMNS: &str =
  "student_id, course_id, lecture_id, completed, score, completed_at";

impl RawProgress {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      student_id:   row.get(0)?,
      course_id:    row.get(1)?,
      lecture_id:   row.get(2)?,
      completed:    row.get(3)?,
      score:        row.get(4)?,
      completed_at: row.get(5)?,
    })
  }

  pub fn into_record(self) -> Result<ProgressRecord> {
    Ok(ProgressRecord {
      student_id:   decode_uuid(&self.student_id)?,
      course_id:    decode_uuid(&self.course_id)?,
      lecture_id:   decode_uuid(&self.lecture_id)?,
      completed:    self.completed,
      score:        self.score,
      completed_at: decode_dt(&self.completed_at)?,
    })
  }
}

/// Raw values read directly from a `quiz_attempts` row.
pub struct RawAttempt {
  pub attempt_id:   String,
  pub student_id:   String,
  pub lecture_id:   String,
  pub answers:      String,
  pub score:        u8,
  pub passed:       bool,
  pub attempted_at: String,
}

pub const ATTEMPT_COLUMNS: &str =
  "attempt_id, student_id, lecture_id, answers, score, passed, attempted_at";

impl RawAttempt {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      attempt_id:   row.get(0)?,
      student_id:   row.get(1)?,
      lecture_id:   row.get(2)?,
      answers:      row.get(3)?,
      score:        row.get(4)?,
      passed:       row.get(5)?,
      attempted_at: row.get(6)?,
    })
  }

  pub fn into_attempt(self) -> Result<QuizAttempt> {
    Ok(QuizAttempt {
      attempt_id:   decode_uuid(&self.attempt_id)?,
      student_id:   decode_uuid(&self.student_id)?,
      lecture_id:   decode_uuid(&self.lecture_id)?,
      answers:      decode_answers(&self.answers)?,
      score:        self.score,
      passed:       self.passed,
      attempted_at: decode_dt(&self.attempted_at)?,
    })
  }
}
