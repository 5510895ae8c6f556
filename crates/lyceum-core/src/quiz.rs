//! Quiz grading and attempt history.
//!
//! Grading is all-or-nothing per question; there is no partial credit. The
//! pass mark is fixed at [`PASS_THRESHOLD`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{lecture::Question, progress::percentage};

/// Minimum score (inclusive) that counts as a pass.
pub const PASS_THRESHOLD: u8 = 70;

/// The outcome of grading one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
  /// Whole-number percentage, 0–100.
  pub score:           u8,
  pub passed:          bool,
  pub correct_count:   u32,
  pub total_questions: u32,
}

/// One immutable submission. Every submission is recorded, pass or fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAttempt {
  pub attempt_id:   Uuid,
  pub student_id:   Uuid,
  pub lecture_id:   Uuid,
  /// Selected option per question, exactly as submitted.
  pub answers:      Vec<u32>,
  pub score:        u8,
  pub passed:       bool,
  pub attempted_at: DateTime<Utc>,
}

/// Grade `answers` against `questions`.
///
/// `answers[i]` is the option chosen for `questions[i]`. Missing answers count
/// as wrong; surplus answers are ignored.
pub fn grade(questions: &[Question], answers: &[u32]) -> QuizResult {
  let correct_count = questions
    .iter()
    .enumerate()
    .filter(|(i, q)| answers.get(*i) == Some(&q.correct_option))
    .count() as u32;
  let total_questions = questions.len() as u32;

  let score = percentage(correct_count, total_questions);

  QuizResult {
    score,
    passed: score >= PASS_THRESHOLD,
    correct_count,
    total_questions,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn questions(correct: &[u32]) -> Vec<Question> {
    correct
      .iter()
      .enumerate()
      .map(|(i, &c)| Question {
        text:           format!("question {i}"),
        options:        vec!["a".into(), "b".into(), "c".into(), "d".into()],
        correct_option: c,
      })
      .collect()
  }

  #[test]
  fn all_correct_scores_full_marks() {
    let qs = questions(&[0, 1]);
    let result = grade(&qs, &[0, 1]);
    assert_eq!(result, QuizResult {
      score:           100,
      passed:          true,
      correct_count:   2,
      total_questions: 2,
    });
  }

  #[test]
  fn all_wrong_scores_zero() {
    let qs = questions(&[0, 1, 2]);
    let result = grade(&qs, &[3, 3, 3]);
    assert_eq!(result.score, 0);
    assert!(!result.passed);
    assert_eq!(result.correct_count, 0);
  }

  #[test]
  fn two_of_three_rounds_to_67_and_fails() {
    let qs = questions(&[0, 1, 2]);
    let result = grade(&qs, &[0, 1, 0]);
    assert_eq!(result.score, 67);
    assert!(!result.passed);
  }

  #[test]
  fn three_of_four_is_75_and_passes() {
    let qs = questions(&[0, 1, 2, 3]);
    let result = grade(&qs, &[0, 1, 2, 0]);
    assert_eq!(result.score, 75);
    assert!(result.passed);
  }

  #[test]
  fn exactly_seventy_passes() {
    let qs = questions(&[0; 10]);
    let answers = [0, 0, 0, 0, 0, 0, 0, 1, 1, 1];
    let result = grade(&qs, &answers);
    assert_eq!(result.score, 70);
    assert!(result.passed);
  }

  #[test]
  fn short_answer_list_counts_missing_as_wrong() {
    let qs = questions(&[0, 1, 2, 3]);
    let result = grade(&qs, &[0]);
    assert_eq!(result.correct_count, 1);
    assert_eq!(result.total_questions, 4);
    assert_eq!(result.score, 25);
  }

  #[test]
  fn surplus_answers_are_ignored() {
    let qs = questions(&[2]);
    let result = grade(&qs, &[2, 0, 1, 3]);
    assert_eq!(result.score, 100);
    assert_eq!(result.total_questions, 1);
  }

  #[test]
  fn half_rounds_up() {
    // 1 of 8 = 12.5%
    let qs = questions(&[0; 8]);
    let result = grade(&qs, &[0]);
    assert_eq!(result.score, 13);
  }
}
