//! [`SqliteStore`]: the SQLite implementation of [`CourseStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension as _, TransactionBehavior};
use uuid::Uuid;

use lyceum_core::{
  course::{Course, NewCourse},
  enrollment::Enrollment,
  lecture::{Lecture, NewLecture},
  progress::ProgressRecord,
  quiz::QuizAttempt,
  store::{CourseStore, QuizSubmission, ReadingCompletion},
};

use crate::{
  encode::{
    ATTEMPT_COLUMNS, COURSE_COLUMNS, ENROLLMENT_COLUMNS, LECTURE_COLUMNS,
    PROGRESS_COLUMNS, RawAttempt, RawCourse, RawEnrollment, RawLecture,
    RawProgress, encode_answers, encode_content, encode_dt,
    encode_lecture_kind, encode_uuid, now, truncate_dt,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Lyceum store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl std::fmt::Debug for SqliteStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SqliteStore").finish_non_exhaustive()
  }
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row helpers (run on the connection thread) ──────────────────────────────

/// Insert the enrollment unless one already exists. Returns the number of
/// rows written (0 or 1).
fn insert_enrollment_if_absent(
  conn:    &rusqlite::Connection,
  student: &str,
  course:  &str,
  at:      &str,
) -> rusqlite::Result<usize> {
  conn.execute(
    "INSERT INTO enrollments (student_id, course_id, enrolled_at)
     VALUES (?1, ?2, ?3)
     ON CONFLICT (student_id, course_id) DO NOTHING",
    rusqlite::params![student, course, at],
  )
}

fn select_enrollment(
  conn:    &rusqlite::Connection,
  student: &str,
  course:  &str,
) -> rusqlite::Result<Option<RawEnrollment>> {
  conn
    .query_row(
      &format!(
        "SELECT {ENROLLMENT_COLUMNS} FROM enrollments
         WHERE student_id = ?1 AND course_id = ?2"
      ),
      rusqlite::params![student, course],
      RawEnrollment::from_row,
    )
    .optional()
}

fn select_progress(
  conn:    &rusqlite::Connection,
  student: &str,
  lecture: &str,
) -> rusqlite::Result<Option<RawProgress>> {
  conn
    .query_row(
      &format!(
        "SELECT {PROGRESS_COLUMNS} FROM progress
         WHERE student_id = ?1 AND lecture_id = ?2"
      ),
      rusqlite::params![student, lecture],
      RawProgress::from_row,
    )
    .optional()
}

// ─── CourseStore impl ────────────────────────────────────────────────────────

impl CourseStore for SqliteStore {
  type Error = Error;

  // ── Catalog ───────────────────────────────────────────────────────────────

  async fn add_course(&self, instructor_id: Uuid, input: NewCourse) -> Result<Course> {
    let course = Course {
      course_id: Uuid::new_v4(),
      title: input.title,
      description: input.description,
      instructor_id,
      created_at: now(),
      image_url: input.image_url,
      category: input.category,
    };

    let id_str         = encode_uuid(course.course_id);
    let title          = course.title.clone();
    let description    = course.description.clone();
    let instructor_str = encode_uuid(instructor_id);
    let at_str         = encode_dt(course.created_at);
    let image_url      = course.image_url.clone();
    let category       = course.category.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO courses (
             course_id, title, description, instructor_id, created_at,
             image_url, category
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            title,
            description,
            instructor_str,
            at_str,
            image_url,
            category,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(course)
  }

  async fn get_course(&self, id: Uuid) -> Result<Option<Course>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawCourse> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {COURSE_COLUMNS} FROM courses WHERE course_id = ?1"),
            rusqlite::params![id_str],
            RawCourse::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawCourse::into_course).transpose()
  }

  async fn list_courses(&self) -> Result<Vec<Course>> {
    let raws: Vec<RawCourse> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COURSE_COLUMNS} FROM courses ORDER BY created_at"
        ))?;
        let rows = stmt
          .query_map([], RawCourse::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCourse::into_course).collect()
  }

  async fn list_courses_by_instructor(
    &self,
    instructor_id: Uuid,
  ) -> Result<Vec<Course>> {
    let instructor_str = encode_uuid(instructor_id);

    let raws: Vec<RawCourse> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COURSE_COLUMNS} FROM courses
           WHERE instructor_id = ?1 ORDER BY created_at"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![instructor_str], RawCourse::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCourse::into_course).collect()
  }

  async fn add_lecture(&self, input: NewLecture) -> Result<Lecture> {
    let lecture_id = Uuid::new_v4();

    let id_str      = encode_uuid(lecture_id);
    let course_str  = encode_uuid(input.course_id);
    let title       = input.title.clone();
    let kind_str    = encode_lecture_kind(input.content.kind()).to_owned();
    let content_str = encode_content(&input.content)?;

    // Counting and inserting share one immediate transaction so that two
    // concurrent additions cannot claim the same position.
    let order: u32 = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let existing: u32 = tx.query_row(
          "SELECT COUNT(*) FROM lectures WHERE course_id = ?1",
          rusqlite::params![course_str],
          |r| r.get(0),
        )?;
        let order = existing + 1;
        tx.execute(
          "INSERT INTO lectures (lecture_id, course_id, title, kind, ord, content_json)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, course_str, title, kind_str, order, content_str],
        )?;
        tx.commit()?;
        Ok(order)
      })
      .await?;

    Ok(Lecture {
      lecture_id,
      course_id: input.course_id,
      title: input.title,
      order,
      content: input.content,
    })
  }

  async fn get_lecture(&self, id: Uuid) -> Result<Option<Lecture>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawLecture> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {LECTURE_COLUMNS} FROM lectures WHERE lecture_id = ?1"),
            rusqlite::params![id_str],
            RawLecture::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawLecture::into_lecture).transpose()
  }

  async fn list_lectures(&self, course_id: Uuid) -> Result<Vec<Lecture>> {
    let course_str = encode_uuid(course_id);

    let raws: Vec<RawLecture> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {LECTURE_COLUMNS} FROM lectures WHERE course_id = ?1 ORDER BY ord"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![course_str], RawLecture::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLecture::into_lecture).collect()
  }

  // ── Enrollment ledger ─────────────────────────────────────────────────────

  async fn ensure_enrollment(
    &self,
    student_id: Uuid,
    course_id:  Uuid,
    at:         DateTime<Utc>,
  ) -> Result<Enrollment> {
    let student_str = encode_uuid(student_id);
    let course_str  = encode_uuid(course_id);
    let at_str      = encode_dt(truncate_dt(at));

    let raw: Option<RawEnrollment> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        insert_enrollment_if_absent(&tx, &student_str, &course_str, &at_str)?;
        let raw = select_enrollment(&tx, &student_str, &course_str)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw
      .ok_or(Error::MissingEnrollment(course_id))?
      .into_enrollment()
  }

  async fn insert_enrollment(
    &self,
    student_id: Uuid,
    course_id:  Uuid,
    at:         DateTime<Utc>,
  ) -> Result<Option<Enrollment>> {
    let student_str = encode_uuid(student_id);
    let course_str  = encode_uuid(course_id);
    let at_str      = encode_dt(truncate_dt(at));

    let raw: Option<RawEnrollment> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let inserted =
          insert_enrollment_if_absent(&tx, &student_str, &course_str, &at_str)?;
        let raw = if inserted == 0 {
          None
        } else {
          select_enrollment(&tx, &student_str, &course_str)?
        };
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawEnrollment::into_enrollment).transpose()
  }

  async fn get_enrollment(
    &self,
    student_id: Uuid,
    course_id:  Uuid,
  ) -> Result<Option<Enrollment>> {
    let student_str = encode_uuid(student_id);
    let course_str  = encode_uuid(course_id);

    let raw: Option<RawEnrollment> = self
      .conn
      .call(move |conn| Ok(select_enrollment(conn, &student_str, &course_str)?))
      .await?;

    raw.map(RawEnrollment::into_enrollment).transpose()
  }

  async fn list_enrollments_for_student(
    &self,
    student_id: Uuid,
  ) -> Result<Vec<Enrollment>> {
    let student_str = encode_uuid(student_id);

    let raws: Vec<RawEnrollment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE student_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![student_str], RawEnrollment::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEnrollment::into_enrollment).collect()
  }

  async fn list_enrollments_for_course(
    &self,
    course_id: Uuid,
  ) -> Result<Vec<Enrollment>> {
    let course_str = encode_uuid(course_id);

    let raws: Vec<RawEnrollment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE course_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![course_str], RawEnrollment::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEnrollment::into_enrollment).collect()
  }

  // ── Progress ──────────────────────────────────────────────────────────────

  async fn complete_reading(&self, input: ReadingCompletion) -> Result<ProgressRecord> {
    let student_str = encode_uuid(input.student_id);
    let course_str  = encode_uuid(input.course_id);
    let lecture_str = encode_uuid(input.lecture_id);
    let at_str      = encode_dt(truncate_dt(input.at));

    let raw: Option<RawProgress> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        insert_enrollment_if_absent(&tx, &student_str, &course_str, &at_str)?;
        tx.execute(
          "INSERT INTO progress (
             student_id, course_id, lecture_id, completed, score, completed_at
           ) VALUES (?1, ?2, ?3, 1, NULL, ?4)
           ON CONFLICT (student_id, lecture_id) DO NOTHING",
          rusqlite::params![student_str, course_str, lecture_str, at_str],
        )?;
        let raw = select_progress(&tx, &student_str, &lecture_str)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw
      .ok_or(Error::MissingProgress(input.lecture_id))?
      .into_record()
  }

  async fn record_quiz_submission(
    &self,
    input: QuizSubmission,
  ) -> Result<Option<ProgressRecord>> {
    let attempt = input.attempt;

    let attempt_str = encode_uuid(attempt.attempt_id);
    let student_str = encode_uuid(attempt.student_id);
    let course_str  = encode_uuid(input.course_id);
    let lecture_str = encode_uuid(attempt.lecture_id);
    let answers_str = encode_answers(&attempt.answers)?;
    let at_str      = encode_dt(truncate_dt(attempt.attempted_at));
    let score       = attempt.score;
    let passed      = attempt.passed;

    let raw: Option<RawProgress> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        insert_enrollment_if_absent(&tx, &student_str, &course_str, &at_str)?;

        tx.execute(
          "INSERT INTO quiz_attempts (
             attempt_id, student_id, lecture_id, answers, score, passed, attempted_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            attempt_str,
            student_str,
            lecture_str,
            answers_str,
            score,
            passed,
            at_str,
          ],
        )?;

        // Only a pass touches progress; a fail never downgrades it.
        if passed {
          tx.execute(
            "INSERT INTO progress (
               student_id, course_id, lecture_id, completed, score, completed_at
             ) VALUES (?1, ?2, ?3, 1, ?4, ?5)
             ON CONFLICT (student_id, lecture_id) DO UPDATE SET
               completed    = 1,
               score        = excluded.score,
               completed_at = excluded.completed_at",
            rusqlite::params![student_str, course_str, lecture_str, score, at_str],
          )?;
        }

        let raw = select_progress(&tx, &student_str, &lecture_str)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawProgress::into_record).transpose()
  }

  async fn get_progress(
    &self,
    student_id: Uuid,
    lecture_id: Uuid,
  ) -> Result<Option<ProgressRecord>> {
    let student_str = encode_uuid(student_id);
    let lecture_str = encode_uuid(lecture_id);

    let raw: Option<RawProgress> = self
      .conn
      .call(move |conn| Ok(select_progress(conn, &student_str, &lecture_str)?))
      .await?;

    raw.map(RawProgress::into_record).transpose()
  }

  async fn list_progress(
    &self,
    student_id: Uuid,
    course_id:  Uuid,
  ) -> Result<Vec<ProgressRecord>> {
    let student_str = encode_uuid(student_id);
    let course_str  = encode_uuid(course_id);

    let raws: Vec<RawProgress> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PROGRESS_COLUMNS} FROM progress
           WHERE student_id = ?1 AND course_id = ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![student_str, course_str], RawProgress::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProgress::into_record).collect()
  }

  async fn list_quiz_attempts(
    &self,
    student_id: Uuid,
    lecture_id: Uuid,
  ) -> Result<Vec<QuizAttempt>> {
    let student_str = encode_uuid(student_id);
    let lecture_str = encode_uuid(lecture_id);

    let raws: Vec<RawAttempt> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ATTEMPT_COLUMNS} FROM quiz_attempts
           WHERE student_id = ?1 AND lecture_id = ?2
           ORDER BY attempted_at, rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![student_str, lecture_str], RawAttempt::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAttempt::into_attempt).collect()
  }
}
