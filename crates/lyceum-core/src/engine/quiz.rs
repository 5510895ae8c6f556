//! The quiz grader.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::Engine;
use crate::{
  Error, Result,
  lecture::LectureKind,
  principal::{Principal, require},
  quiz::{QuizAttempt, QuizResult, grade},
  store::{CourseStore, QuizSubmission},
};

impl<S: CourseStore> Engine<S> {
  /// Grade `answers` for a quiz lecture and record the attempt.
  ///
  /// The attempt is always appended. A passing attempt also creates or
  /// overwrites the caller's progress record for the lecture; a failing one
  /// leaves it alone, so an earlier pass is never undone.
  pub async fn submit_quiz(
    &self,
    principal: Option<&Principal>,
    lecture_id: Uuid,
    answers: Vec<u32>,
  ) -> Result<QuizResult> {
    let principal = require(principal)?;
    let lecture = self.lecture(lecture_id).await?;
    lecture.expect_kind(LectureKind::Quiz)?;

    let questions = lecture.questions().unwrap_or_default();
    if questions.is_empty() {
      return Err(Error::InvalidLectureKind {
        lecture:  lecture_id,
        expected: LectureKind::Quiz,
        reason:   "it has no questions".into(),
      });
    }

    let result = grade(questions, &answers);

    let attempt = QuizAttempt {
      attempt_id: Uuid::new_v4(),
      student_id: principal.user_id,
      lecture_id,
      answers,
      score: result.score,
      passed: result.passed,
      attempted_at: Utc::now(),
    };

    self
      .store
      .record_quiz_submission(QuizSubmission {
        course_id: lecture.course_id,
        attempt,
      })
      .await
      .map_err(Error::store)?;

    info!(
      student = %principal.user_id,
      lecture = %lecture_id,
      score = result.score,
      passed = result.passed,
      "quiz submitted"
    );
    Ok(result)
  }

  /// The caller's attempts at a quiz, oldest first.
  pub async fn get_quiz_attempts(
    &self,
    principal: Option<&Principal>,
    lecture_id: Uuid,
  ) -> Result<Vec<QuizAttempt>> {
    let principal = require(principal)?;
    self.lecture(lecture_id).await?;
    self
      .store
      .list_quiz_attempts(principal.user_id, lecture_id)
      .await
      .map_err(Error::store)
  }
}
