//! Integration tests for `SqliteStore` and the engine on top of it, against an
//! in-memory database.

use lyceum_core::{
  Engine, Error,
  course::{Course, NewCourse},
  lecture::{
    ContentView, Lecture, LectureContent, NewLecture, Question, QuizContent,
    ReadingContent,
  },
  principal::Principal,
  store::CourseStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn engine() -> Engine<SqliteStore> { Engine::new(store().await) }

struct Fixture {
  engine:     Engine<SqliteStore>,
  instructor: Principal,
  student:    Principal,
  course:     Course,
}

async fn fixture() -> Fixture {
  let engine = engine().await;
  let instructor = Principal::instructor(Uuid::new_v4());
  let student = Principal::student(Uuid::new_v4());
  let course = engine
    .create_course(Some(&instructor), new_course("Rust for the Curious"))
    .await
    .unwrap();
  Fixture { engine, instructor, student, course }
}

fn new_course(title: &str) -> NewCourse {
  NewCourse {
    title:       title.into(),
    description: "An introduction".into(),
    image_url:   None,
    category:    Some("programming".into()),
  }
}

fn reading(course_id: Uuid, title: &str) -> NewLecture {
  NewLecture {
    course_id,
    title: title.into(),
    content: LectureContent::Reading(ReadingContent {
      content: Some("Ownership means...".into()),
      link:    None,
      file:    None,
    }),
  }
}

/// A quiz whose question `i` has `correct[i]` as its answer.
fn quiz(course_id: Uuid, title: &str, correct: &[u32]) -> NewLecture {
  NewLecture {
    course_id,
    title: title.into(),
    content: LectureContent::Quiz(QuizContent {
      questions: correct
        .iter()
        .enumerate()
        .map(|(i, &c)| Question {
          text:           format!("Question {i}"),
          options:        vec!["a".into(), "b".into(), "c".into()],
          correct_option: c,
        })
        .collect(),
    }),
  }
}

impl Fixture {
  async fn add(&self, lecture: NewLecture) -> Lecture {
    self
      .engine
      .create_lecture(Some(&self.instructor), lecture)
      .await
      .unwrap()
  }

  async fn access(&self, index: usize) -> bool {
    self
      .engine
      .can_access_lecture(Some(&self.student), self.course.course_id, index)
      .await
      .unwrap()
  }
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_course() {
  let f = fixture().await;

  let fetched = f.engine.get_course(f.course.course_id).await.unwrap();
  assert_eq!(fetched.title, "Rust for the Curious");
  assert_eq!(fetched.instructor_id, f.instructor.user_id);
  assert_eq!(fetched.created_at, f.course.created_at);

  let all = f.engine.list_courses().await.unwrap();
  assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn students_cannot_create_courses() {
  let f = fixture().await;
  let err = f
    .engine
    .create_course(Some(&f.student), new_course("Nope"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotAuthorized(_)));
}

#[tokio::test]
async fn blank_course_title_is_rejected() {
  let f = fixture().await;
  let err = f
    .engine
    .create_course(Some(&f.instructor), new_course("   "))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn lectures_are_numbered_in_creation_order() {
  let f = fixture().await;
  let cid = f.course.course_id;

  let a = f.add(reading(cid, "A")).await;
  let b = f.add(quiz(cid, "B", &[0])).await;
  let c = f.add(reading(cid, "C")).await;
  assert_eq!((a.order, b.order, c.order), (1, 2, 3));

  let listed = f.engine.store().list_lectures(cid).await.unwrap();
  let titles: Vec<_> = listed.iter().map(|l| l.title.as_str()).collect();
  assert_eq!(titles, vec!["A", "B", "C"]);
  assert_eq!(listed[1].content, b.content);
}

#[tokio::test]
async fn only_the_course_instructor_adds_lectures() {
  let f = fixture().await;
  let other = Principal::instructor(Uuid::new_v4());

  let err = f
    .engine
    .create_lecture(Some(&other), reading(f.course.course_id, "Intrusion"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotAuthorized(_)));

  let err = f
    .engine
    .create_lecture(Some(&f.instructor), reading(Uuid::new_v4(), "Orphan"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::CourseNotFound(_)));
}

#[tokio::test]
async fn student_lecture_view_hides_answers() {
  let f = fixture().await;
  let q = f.add(quiz(f.course.course_id, "Check", &[2, 1])).await;

  let view = f
    .engine
    .get_lecture(Some(&f.student), q.lecture_id)
    .await
    .unwrap();
  let ContentView::Quiz { questions } = view.content else {
    panic!("expected quiz content");
  };
  assert!(questions.iter().all(|q| q.correct_option.is_none()));

  let view = f
    .engine
    .get_lecture(Some(&f.instructor), q.lecture_id)
    .await
    .unwrap();
  let ContentView::Quiz { questions } = view.content else {
    panic!("expected quiz content");
  };
  assert_eq!(questions[0].correct_option, Some(2));

  // The stored form is untouched.
  let stored = f.engine.store().get_lecture(q.lecture_id).await.unwrap().unwrap();
  assert_eq!(stored.questions().unwrap()[1].correct_option, 1);
}

#[tokio::test]
async fn get_missing_lecture_is_not_found() {
  let f = fixture().await;
  let err = f
    .engine
    .get_lecture(Some(&f.student), Uuid::new_v4())
    .await
    .unwrap_err();
  assert!(err.is_not_found());
}

#[tokio::test]
async fn instructor_courses_carry_counts() {
  let f = fixture().await;
  let cid = f.course.course_id;
  f.add(reading(cid, "Intro")).await;
  f.add(quiz(cid, "Quiz", &[0])).await;
  f.engine.enroll(Some(&f.student), cid).await.unwrap();

  let second = f
    .engine
    .create_course(Some(&f.instructor), new_course("Advanced Lifetimes"))
    .await
    .unwrap();
  let colleague = Principal::instructor(Uuid::new_v4());
  f.engine
    .create_course(Some(&colleague), new_course("Someone Else's"))
    .await
    .unwrap();

  let summaries = f.engine.instructor_courses(Some(&f.instructor)).await.unwrap();
  assert_eq!(summaries.len(), 2);

  let first = summaries.iter().find(|s| s.course.course_id == cid).unwrap();
  assert_eq!(first.enrollment_count, 1);
  assert_eq!(first.lecture_count, 2);

  let other = summaries
    .iter()
    .find(|s| s.course.course_id == second.course_id)
    .unwrap();
  assert_eq!(other.enrollment_count, 0);
  assert_eq!(other.lecture_count, 0);

  assert!(f.engine.instructor_courses(Some(&f.student)).await.unwrap().is_empty());
  assert!(matches!(
    f.engine.instructor_courses(None).await,
    Err(Error::NotAuthenticated)
  ));
}

// ─── Enrollment ledger ───────────────────────────────────────────────────────

#[tokio::test]
async fn ensure_enrolled_twice_yields_one_record() {
  let f = fixture().await;
  let cid = f.course.course_id;

  let first = f.engine.ensure_enrolled(Some(&f.student), cid).await.unwrap();
  let second = f.engine.ensure_enrolled(Some(&f.student), cid).await.unwrap();
  assert_eq!(first, second);

  let all = f.engine.store().list_enrollments_for_course(cid).await.unwrap();
  assert_eq!(all.len(), 1);
  assert!(f.engine.is_enrolled(Some(&f.student), cid).await.unwrap());
}

#[tokio::test]
async fn explicit_enroll_rejects_duplicates() {
  let f = fixture().await;
  let cid = f.course.course_id;

  f.engine.enroll(Some(&f.student), cid).await.unwrap();
  let err = f.engine.enroll(Some(&f.student), cid).await.unwrap_err();
  assert!(matches!(err, Error::AlreadyEnrolled { .. }));

  // Auto-enrollment stays tolerant after an explicit enroll.
  f.engine.ensure_enrolled(Some(&f.student), cid).await.unwrap();
  assert_eq!(f.engine.enrollment_count(cid).await.unwrap(), 1);
}

#[tokio::test]
async fn explicit_enroll_after_auto_enroll_is_rejected() {
  let f = fixture().await;
  let cid = f.course.course_id;
  let r = f.add(reading(cid, "Intro")).await;

  f.engine
    .record_reading_completion(Some(&f.student), r.lecture_id)
    .await
    .unwrap();
  let err = f.engine.enroll(Some(&f.student), cid).await.unwrap_err();
  assert!(matches!(err, Error::AlreadyEnrolled { .. }));
}

#[tokio::test]
async fn enroll_in_missing_course_is_not_found() {
  let f = fixture().await;
  let err = f
    .engine
    .enroll(Some(&f.student), Uuid::new_v4())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::CourseNotFound(_)));
}

#[tokio::test]
async fn ensure_enrolled_in_missing_course_is_not_found() {
  let f = fixture().await;
  let missing = Uuid::new_v4();
  let err = f
    .engine
    .ensure_enrolled(Some(&f.student), missing)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::CourseNotFound(id) if id == missing));

  let mine = f
    .engine
    .list_enrollments_for_student(Some(&f.student))
    .await
    .unwrap();
  assert!(mine.is_empty());
}

#[tokio::test]
async fn anonymous_callers_are_rejected() {
  let f = fixture().await;
  let cid = f.course.course_id;
  let r = f.add(reading(cid, "Intro")).await;
  let q = f.add(quiz(cid, "Quiz", &[0])).await;

  let results = [
    f.engine.ensure_enrolled(None, cid).await.err(),
    f.engine.enroll(None, cid).await.err(),
    f.engine.record_reading_completion(None, r.lecture_id).await.err(),
    f.engine.submit_quiz(None, q.lecture_id, vec![0]).await.err(),
    f.engine.get_course_progress(None, cid).await.err(),
  ];
  for err in results {
    assert!(matches!(err, Some(Error::NotAuthenticated)), "{err:?}");
  }

  assert_eq!(f.engine.enrollment_count(cid).await.unwrap(), 0);
  let attempts = f
    .engine
    .store()
    .list_quiz_attempts(Uuid::nil(), q.lecture_id)
    .await
    .unwrap();
  assert!(attempts.is_empty());
}

#[tokio::test]
async fn enrollment_listings() {
  let f = fixture().await;
  let other_course = f
    .engine
    .create_course(Some(&f.instructor), new_course("Second"))
    .await
    .unwrap();
  let classmate = Principal::student(Uuid::new_v4());

  f.engine.enroll(Some(&f.student), f.course.course_id).await.unwrap();
  f.engine.enroll(Some(&f.student), other_course.course_id).await.unwrap();
  f.engine.enroll(Some(&classmate), f.course.course_id).await.unwrap();

  let mine = f.engine.list_enrollments_for_student(Some(&f.student)).await.unwrap();
  assert_eq!(mine.len(), 2);

  let roster = f
    .engine
    .list_enrollments_for_course(Some(&f.instructor), f.course.course_id)
    .await
    .unwrap();
  assert_eq!(roster.len(), 2);

  let err = f
    .engine
    .list_enrollments_for_course(Some(&f.student), f.course.course_id)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotAuthorized(_)));
}

// ─── Reading completion ──────────────────────────────────────────────────────

#[tokio::test]
async fn reading_completion_is_idempotent_and_keeps_first_timestamp() {
  let f = fixture().await;
  let r = f.add(reading(f.course.course_id, "Intro")).await;

  let first = f
    .engine
    .record_reading_completion(Some(&f.student), r.lecture_id)
    .await
    .unwrap();
  tokio::time::sleep(std::time::Duration::from_millis(5)).await;
  let second = f
    .engine
    .record_reading_completion(Some(&f.student), r.lecture_id)
    .await
    .unwrap();

  assert_eq!(first, second);
  assert!(first.completed);
  assert_eq!(first.score, None);

  let records = f
    .engine
    .store()
    .list_progress(f.student.user_id, f.course.course_id)
    .await
    .unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0].completed_at, first.completed_at);
}

#[tokio::test]
async fn reading_completion_auto_enrolls() {
  let f = fixture().await;
  let r = f.add(reading(f.course.course_id, "Intro")).await;

  assert!(!f.engine.is_enrolled(Some(&f.student), f.course.course_id).await.unwrap());
  f.engine
    .record_reading_completion(Some(&f.student), r.lecture_id)
    .await
    .unwrap();
  assert!(f.engine.is_enrolled(Some(&f.student), f.course.course_id).await.unwrap());
}

#[tokio::test]
async fn reading_completion_on_quiz_is_rejected_without_writes() {
  let f = fixture().await;
  let q = f.add(quiz(f.course.course_id, "Quiz", &[0])).await;

  let err = f
    .engine
    .record_reading_completion(Some(&f.student), q.lecture_id)
    .await
    .unwrap_err();
  assert!(err.is_invalid_lecture_kind());

  // A failed mutation leaves no trace, not even an enrollment.
  assert!(!f.engine.is_enrolled(Some(&f.student), f.course.course_id).await.unwrap());
}

#[tokio::test]
async fn reading_completion_on_missing_lecture_is_not_found() {
  let f = fixture().await;
  let err = f
    .engine
    .record_reading_completion(Some(&f.student), Uuid::new_v4())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::LectureNotFound(_)));
}

// ─── Quiz grading ────────────────────────────────────────────────────────────

#[tokio::test]
async fn perfect_submission_creates_progress_and_attempt() {
  let f = fixture().await;
  let q = f.add(quiz(f.course.course_id, "Quiz", &[0, 1])).await;

  let result = f
    .engine
    .submit_quiz(Some(&f.student), q.lecture_id, vec![0, 1])
    .await
    .unwrap();
  assert_eq!(result.score, 100);
  assert!(result.passed);
  assert_eq!(result.correct_count, 2);
  assert_eq!(result.total_questions, 2);

  let record = f
    .engine
    .store()
    .get_progress(f.student.user_id, q.lecture_id)
    .await
    .unwrap()
    .expect("progress record");
  assert!(record.completed);
  assert_eq!(record.score, Some(100));

  let attempts = f
    .engine
    .get_quiz_attempts(Some(&f.student), q.lecture_id)
    .await
    .unwrap();
  assert_eq!(attempts.len(), 1);
  assert!(attempts[0].passed);
  assert_eq!(attempts[0].answers, vec![0, 1]);
  assert!(f.engine.is_enrolled(Some(&f.student), f.course.course_id).await.unwrap());
}

#[tokio::test]
async fn failed_submission_records_attempt_only() {
  let f = fixture().await;
  let q = f.add(quiz(f.course.course_id, "Quiz", &[0, 1, 2])).await;

  let result = f
    .engine
    .submit_quiz(Some(&f.student), q.lecture_id, vec![0, 1, 0])
    .await
    .unwrap();
  assert_eq!(result.score, 67);
  assert!(!result.passed);

  let record = f
    .engine
    .store()
    .get_progress(f.student.user_id, q.lecture_id)
    .await
    .unwrap();
  assert!(record.is_none());

  let attempts = f
    .engine
    .get_quiz_attempts(Some(&f.student), q.lecture_id)
    .await
    .unwrap();
  assert_eq!(attempts.len(), 1);
  assert!(!attempts[0].passed);
  assert_eq!(attempts[0].score, 67);
  // Failing still enrolls.
  assert!(f.engine.is_enrolled(Some(&f.student), f.course.course_id).await.unwrap());
}

#[tokio::test]
async fn later_failure_never_downgrades_a_pass() {
  let f = fixture().await;
  let q = f.add(quiz(f.course.course_id, "Quiz", &[0, 1, 2, 0])).await;

  let pass = f
    .engine
    .submit_quiz(Some(&f.student), q.lecture_id, vec![0, 1, 2, 1])
    .await
    .unwrap();
  assert_eq!(pass.score, 75);
  assert!(pass.passed);
  let after_pass = f
    .engine
    .store()
    .get_progress(f.student.user_id, q.lecture_id)
    .await
    .unwrap()
    .unwrap();

  let fail = f
    .engine
    .submit_quiz(Some(&f.student), q.lecture_id, vec![])
    .await
    .unwrap();
  assert_eq!(fail.score, 0);
  assert!(!fail.passed);

  let after_fail = f
    .engine
    .store()
    .get_progress(f.student.user_id, q.lecture_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(after_fail, after_pass);
  assert!(f.engine.is_lecture_completed(Some(&f.student), q.lecture_id).await.unwrap());

  let attempts = f
    .engine
    .get_quiz_attempts(Some(&f.student), q.lecture_id)
    .await
    .unwrap();
  let passed: Vec<bool> = attempts.iter().map(|a| a.passed).collect();
  assert_eq!(passed, vec![true, false]);
}

#[tokio::test]
async fn later_pass_overwrites_score_in_place() {
  let f = fixture().await;
  let q = f.add(quiz(f.course.course_id, "Quiz", &[0, 1, 2, 0])).await;

  f.engine
    .submit_quiz(Some(&f.student), q.lecture_id, vec![0, 1, 2, 1])
    .await
    .unwrap();
  tokio::time::sleep(std::time::Duration::from_millis(5)).await;
  f.engine
    .submit_quiz(Some(&f.student), q.lecture_id, vec![0, 1, 2, 0])
    .await
    .unwrap();

  let records = f
    .engine
    .store()
    .list_progress(f.student.user_id, f.course.course_id)
    .await
    .unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0].score, Some(100));

  let attempts = f
    .engine
    .get_quiz_attempts(Some(&f.student), q.lecture_id)
    .await
    .unwrap();
  assert_eq!(attempts.len(), 2);
  assert_eq!(records[0].completed_at, attempts[1].attempted_at);
}

#[tokio::test]
async fn quiz_submission_to_reading_is_rejected() {
  let f = fixture().await;
  let r = f.add(reading(f.course.course_id, "Intro")).await;

  let err = f
    .engine
    .submit_quiz(Some(&f.student), r.lecture_id, vec![0])
    .await
    .unwrap_err();
  assert!(err.is_invalid_lecture_kind());

  let attempts = f
    .engine
    .store()
    .list_quiz_attempts(f.student.user_id, r.lecture_id)
    .await
    .unwrap();
  assert!(attempts.is_empty());
}

#[tokio::test]
async fn quiz_without_questions_is_rejected_as_invalid_kind() {
  let f = fixture().await;
  // Authoring validation refuses empty quizzes, so write straight to the store.
  let empty = f
    .engine
    .store()
    .add_lecture(quiz(f.course.course_id, "Empty", &[]))
    .await
    .unwrap();

  let err = f
    .engine
    .submit_quiz(Some(&f.student), empty.lecture_id, vec![])
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::InvalidLectureKind { lecture, .. } if lecture == empty.lecture_id
  ));

  let attempts = f
    .engine
    .store()
    .list_quiz_attempts(f.student.user_id, empty.lecture_id)
    .await
    .unwrap();
  assert!(attempts.is_empty());
  assert!(!f.engine.is_enrolled(Some(&f.student), f.course.course_id).await.unwrap());
}

#[tokio::test]
async fn attempts_are_private_to_each_student() {
  let f = fixture().await;
  let q = f.add(quiz(f.course.course_id, "Quiz", &[0])).await;
  let classmate = Principal::student(Uuid::new_v4());

  f.engine.submit_quiz(Some(&f.student), q.lecture_id, vec![0]).await.unwrap();

  let theirs = f
    .engine
    .get_quiz_attempts(Some(&classmate), q.lecture_id)
    .await
    .unwrap();
  assert!(theirs.is_empty());
}

#[tokio::test]
async fn concurrent_passing_submissions_leave_one_progress_record() {
  let f = fixture().await;
  let q = f.add(quiz(f.course.course_id, "Quiz", &[1])).await;

  let (a, b) = tokio::join!(
    f.engine.submit_quiz(Some(&f.student), q.lecture_id, vec![1]),
    f.engine.submit_quiz(Some(&f.student), q.lecture_id, vec![1]),
  );
  assert!(a.unwrap().passed);
  assert!(b.unwrap().passed);

  let records = f
    .engine
    .store()
    .list_progress(f.student.user_id, f.course.course_id)
    .await
    .unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(f.engine.enrollment_count(f.course.course_id).await.unwrap(), 1);
}

// ─── Progress & outline ──────────────────────────────────────────────────────

#[tokio::test]
async fn course_progress_one_of_four() {
  let f = fixture().await;
  let cid = f.course.course_id;
  let first = f.add(reading(cid, "1")).await;
  f.add(reading(cid, "2")).await;
  f.add(quiz(cid, "3", &[0])).await;
  f.add(reading(cid, "4")).await;

  f.engine
    .record_reading_completion(Some(&f.student), first.lecture_id)
    .await
    .unwrap();

  let progress = f.engine.get_course_progress(Some(&f.student), cid).await.unwrap();
  assert_eq!(progress.total_lectures, 4);
  assert_eq!(progress.completed_lectures, 1);
  assert_eq!(progress.progress_percentage, 25);
  assert_eq!(progress.lecture_progress.len(), 1);
}

#[tokio::test]
async fn empty_course_progress_is_zero() {
  let f = fixture().await;
  let progress = f
    .engine
    .get_course_progress(Some(&f.student), f.course.course_id)
    .await
    .unwrap();
  assert_eq!(progress.total_lectures, 0);
  assert_eq!(progress.progress_percentage, 0);
}

#[tokio::test]
async fn progress_for_missing_course_is_not_found() {
  let f = fixture().await;
  let err = f
    .engine
    .get_course_progress(Some(&f.student), Uuid::new_v4())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::CourseNotFound(_)));
}

#[tokio::test]
async fn lectures_unlock_one_at_a_time() {
  let f = fixture().await;
  let cid = f.course.course_id;
  let a = f.add(reading(cid, "A")).await;
  let b = f.add(quiz(cid, "B", &[2])).await;
  f.add(reading(cid, "C")).await;

  assert!(f.access(0).await);
  assert!(!f.access(1).await);
  assert!(!f.access(2).await);

  f.engine.record_reading_completion(Some(&f.student), a.lecture_id).await.unwrap();
  assert!(f.access(1).await);
  assert!(!f.access(2).await);

  // A failed quiz keeps C locked.
  f.engine.submit_quiz(Some(&f.student), b.lecture_id, vec![0]).await.unwrap();
  assert!(!f.access(2).await);

  f.engine.submit_quiz(Some(&f.student), b.lecture_id, vec![2]).await.unwrap();
  assert!(f.access(2).await);
  assert!(!f.access(3).await);

  let outline = f.engine.course_outline(Some(&f.student), cid).await.unwrap();
  let states: Vec<(bool, bool, Option<u8>)> = outline
    .lectures
    .iter()
    .map(|l| (l.completed, l.accessible, l.score))
    .collect();
  assert_eq!(states, vec![
    (true, true, None),
    (true, true, Some(100)),
    (false, true, None),
  ]);
}

#[tokio::test]
async fn completing_later_lecture_first_does_not_skip_gating() {
  let f = fixture().await;
  let cid = f.course.course_id;
  f.add(reading(cid, "A")).await;
  f.add(reading(cid, "B")).await;
  let c = f.add(reading(cid, "C")).await;

  f.engine.record_reading_completion(Some(&f.student), c.lecture_id).await.unwrap();

  assert!(!f.engine.can_access_lecture(Some(&f.student), cid, 1).await.unwrap());
  assert!(!f.engine.can_access_lecture(Some(&f.student), cid, 2).await.unwrap());
  assert!(f.engine.is_lecture_completed(Some(&f.student), c.lecture_id).await.unwrap());
}

// ─── Store-level invariants ──────────────────────────────────────────────────

#[tokio::test]
async fn quiz_attempts_cannot_be_rewritten() {
  let f = fixture().await;
  let q = f.add(quiz(f.course.course_id, "Quiz", &[0])).await;
  f.engine.submit_quiz(Some(&f.student), q.lecture_id, vec![1]).await.unwrap();

  let update = f
    .engine
    .store()
    .conn
    .call(|conn| {
      conn.execute("UPDATE quiz_attempts SET passed = 1", [])?;
      Ok(())
    })
    .await;
  assert!(update.is_err());

  let delete = f
    .engine
    .store()
    .conn
    .call(|conn| {
      conn.execute("DELETE FROM quiz_attempts", [])?;
      Ok(())
    })
    .await;
  assert!(delete.is_err());
}

#[tokio::test]
async fn insert_enrollment_reports_duplicates_as_none() {
  let s = store().await;
  let instructor = Uuid::new_v4();
  let course = s.add_course(instructor, new_course("Direct")).await.unwrap();
  let student = Uuid::new_v4();
  let now = chrono::Utc::now();

  let first = s.insert_enrollment(student, course.course_id, now).await.unwrap();
  assert!(first.is_some());
  let second = s.insert_enrollment(student, course.course_id, now).await.unwrap();
  assert!(second.is_none());
}

#[tokio::test]
async fn ensure_enrollment_keeps_original_timestamp() {
  let s = store().await;
  let course = s.add_course(Uuid::new_v4(), new_course("Direct")).await.unwrap();
  let student = Uuid::new_v4();
  let earlier = chrono::Utc::now() - chrono::Duration::days(1);

  let first = s.ensure_enrollment(student, course.course_id, earlier).await.unwrap();
  let second = s
    .ensure_enrollment(student, course.course_id, chrono::Utc::now())
    .await
    .unwrap();
  assert_eq!(first.enrolled_at, second.enrolled_at);
}
