//! Lectures: ordered units of course content, either a reading or a quiz.
//!
//! A lecture is stored in exactly one canonical shape that always includes
//! each question's correct option. What a viewer sees is derived at read time
//! by [`Lecture::view_for`].

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, principal::Principal};

// ─── Kind ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LectureKind {
  Reading,
  Quiz,
}

impl LectureKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Reading => "reading",
      Self::Quiz => "quiz",
    }
  }
}

impl fmt::Display for LectureKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Reading payload ─────────────────────────────────────────────────────────

/// A reference to an uploaded file. Upload itself happens elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
  pub url:        String,
  pub name:       String,
  pub media_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingContent {
  /// Inline text (markdown or plain).
  pub content: Option<String>,
  /// An external link to read.
  pub link:    Option<String>,
  pub file:    Option<FileRef>,
}

// ─── Quiz payload ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub text:           String,
  pub options:        Vec<String>,
  /// Zero-based index into `options`.
  pub correct_option: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizContent {
  pub questions: Vec<Question>,
}

// ─── Content ─────────────────────────────────────────────────────────────────

/// The payload of a lecture. The variant determines the [`LectureKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LectureContent {
  Reading(ReadingContent),
  Quiz(QuizContent),
}

impl LectureContent {
  pub fn kind(&self) -> LectureKind {
    match self {
      Self::Reading(_) => LectureKind::Reading,
      Self::Quiz(_) => LectureKind::Quiz,
    }
  }
}

// ─── Lecture ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lecture {
  pub lecture_id: Uuid,
  pub course_id:  Uuid,
  pub title:      String,
  /// Position within the course, starting at 1. Unique per course.
  pub order:      u32,
  pub content:    LectureContent,
}

impl Lecture {
  pub fn kind(&self) -> LectureKind { self.content.kind() }

  /// The quiz questions, or `None` for a reading lecture.
  pub fn questions(&self) -> Option<&[Question]> {
    match &self.content {
      LectureContent::Quiz(q) => Some(&q.questions),
      LectureContent::Reading(_) => None,
    }
  }

  /// Fail with [`Error::InvalidLectureKind`] unless this lecture is `expected`.
  pub fn expect_kind(&self, expected: LectureKind) -> Result<()> {
    let actual = self.kind();
    if actual != expected {
      return Err(Error::InvalidLectureKind {
        lecture: self.lecture_id,
        expected,
        reason: format!("it is a {actual} lecture"),
      });
    }
    Ok(())
  }

  /// Render this lecture for `viewer`.
  ///
  /// Students never see correct options. Everyone else, including an
  /// unidentified caller, sees the stored form.
  pub fn view_for(&self, viewer: Option<&Principal>) -> LectureView {
    let redact = viewer.is_some_and(Principal::is_student);

    let content = match &self.content {
      LectureContent::Reading(r) => ContentView::Reading(r.clone()),
      LectureContent::Quiz(q) => ContentView::Quiz {
        questions: q
          .questions
          .iter()
          .map(|question| QuestionView {
            text:           question.text.clone(),
            options:        question.options.clone(),
            correct_option: (!redact).then_some(question.correct_option),
          })
          .collect(),
      },
    };

    LectureView {
      lecture_id: self.lecture_id,
      course_id: self.course_id,
      title: self.title.clone(),
      order: self.order,
      content,
    }
  }
}

// ─── NewLecture ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::CourseStore::add_lecture`].
/// The `order` is assigned by the store as the next free position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLecture {
  pub course_id: Uuid,
  pub title:     String,
  pub content:   LectureContent,
}

impl NewLecture {
  pub fn validate(&self) -> Result<()> {
    if self.title.trim().is_empty() {
      return Err(Error::Validation("lecture title must not be blank".into()));
    }

    let LectureContent::Quiz(quiz) = &self.content else {
      return Ok(());
    };

    if quiz.questions.is_empty() {
      return Err(Error::Validation("a quiz needs at least one question".into()));
    }

    for (i, question) in quiz.questions.iter().enumerate() {
      if question.options.len() < 2 {
        return Err(Error::Validation(format!(
          "question {i} needs at least two options"
        )));
      }
      if question.correct_option as usize >= question.options.len() {
        return Err(Error::Validation(format!(
          "question {i}: correct option {} is out of range",
          question.correct_option
        )));
      }
    }

    Ok(())
  }
}

// ─── Views ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
  pub text:           String,
  pub options:        Vec<String>,
  /// Absent when the viewer is a student.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub correct_option: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentView {
  Reading(ReadingContent),
  Quiz { questions: Vec<QuestionView> },
}

/// A lecture as returned to a particular caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LectureView {
  pub lecture_id: Uuid,
  pub course_id:  Uuid,
  pub title:      String,
  pub order:      u32,
  pub content:    ContentView,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn quiz_lecture() -> Lecture {
    Lecture {
      lecture_id: Uuid::new_v4(),
      course_id:  Uuid::new_v4(),
      title:      "Checkpoint".into(),
      order:      2,
      content:    LectureContent::Quiz(QuizContent {
        questions: vec![
          Question {
            text:           "2 + 2?".into(),
            options:        vec!["3".into(), "4".into()],
            correct_option: 1,
          },
          Question {
            text:           "Capital of France?".into(),
            options:        vec!["Paris".into(), "Lyon".into(), "Nice".into()],
            correct_option: 0,
          },
        ],
      }),
    }
  }

  fn quiz_questions(view: &LectureView) -> &[QuestionView] {
    match &view.content {
      ContentView::Quiz { questions } => questions,
      ContentView::Reading(_) => panic!("expected a quiz view"),
    }
  }

  #[test]
  fn student_view_withholds_correct_options() {
    let lecture = quiz_lecture();
    let student = Principal::student(Uuid::new_v4());

    let view = lecture.view_for(Some(&student));
    let questions = quiz_questions(&view);

    assert_eq!(questions.len(), 2);
    assert!(questions.iter().all(|q| q.correct_option.is_none()));
    assert_eq!(questions[1].text, "Capital of France?");
    assert_eq!(questions[1].options, vec!["Paris", "Lyon", "Nice"]);
  }

  #[test]
  fn instructor_and_anonymous_views_keep_correct_options() {
    let lecture = quiz_lecture();
    let instructor = Principal::instructor(Uuid::new_v4());

    for viewer in [Some(&instructor), None] {
      let view = lecture.view_for(viewer);
      let correct: Vec<_> =
        quiz_questions(&view).iter().map(|q| q.correct_option).collect();
      assert_eq!(correct, vec![Some(1), Some(0)]);
    }
  }

  #[test]
  fn redacted_question_omits_field_in_json() {
    let lecture = quiz_lecture();
    let student = Principal::student(Uuid::new_v4());

    let json = serde_json::to_value(lecture.view_for(Some(&student))).unwrap();
    let first = &json["content"]["questions"][0];
    assert!(first.get("correct_option").is_none());
    assert_eq!(json["content"]["kind"], "quiz");
  }

  #[test]
  fn redaction_does_not_touch_the_stored_lecture() {
    let lecture = quiz_lecture();
    let student = Principal::student(Uuid::new_v4());
    let _ = lecture.view_for(Some(&student));
    assert_eq!(lecture.questions().unwrap()[0].correct_option, 1);
  }

  #[test]
  fn expect_kind_rejects_mismatch() {
    let lecture = quiz_lecture();
    assert!(lecture.expect_kind(LectureKind::Quiz).is_ok());
    let err = lecture.expect_kind(LectureKind::Reading).unwrap_err();
    assert!(matches!(
      err,
      Error::InvalidLectureKind { expected: LectureKind::Reading, .. }
    ));
    assert!(err.to_string().contains("it is a quiz lecture"));
  }

  #[test]
  fn new_lecture_validation() {
    let course_id = Uuid::new_v4();
    let reading = NewLecture {
      course_id,
      title: "Intro".into(),
      content: LectureContent::Reading(ReadingContent::default()),
    };
    assert!(reading.validate().is_ok());

    let blank = NewLecture { title: "  ".into(), ..reading.clone() };
    assert!(matches!(blank.validate(), Err(Error::Validation(_))));

    let empty_quiz = NewLecture {
      content: LectureContent::Quiz(QuizContent::default()),
      ..reading.clone()
    };
    assert!(matches!(empty_quiz.validate(), Err(Error::Validation(_))));

    let out_of_range = NewLecture {
      content: LectureContent::Quiz(QuizContent {
        questions: vec![Question {
          text:           "?".into(),
          options:        vec!["a".into(), "b".into()],
          correct_option: 2,
        }],
      }),
      ..reading
    };
    assert!(matches!(out_of_range.validate(), Err(Error::Validation(_))));
  }
}
