//! SQL schema for the Lyceum SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS courses (
    course_id     TEXT PRIMARY KEY,
    title         TEXT NOT NULL,
    description   TEXT NOT NULL DEFAULT '',
    instructor_id TEXT NOT NULL,
    created_at    TEXT NOT NULL,
    image_url     TEXT,
    category      TEXT
);

CREATE TABLE IF NOT EXISTS lectures (
    lecture_id   TEXT PRIMARY KEY,
    course_id    TEXT NOT NULL REFERENCES courses(course_id),
    title        TEXT NOT NULL,
    kind         TEXT NOT NULL,     -- 'reading' | 'quiz'
    ord          INTEGER NOT NULL CHECK (ord >= 1),
    content_json TEXT NOT NULL,     -- JSON-encoded LectureContent
    UNIQUE (course_id, ord)
);

-- One row per (student, course).
CREATE TABLE IF NOT EXISTS enrollments (
    student_id  TEXT NOT NULL,
    course_id   TEXT NOT NULL REFERENCES courses(course_id),
    enrolled_at TEXT NOT NULL,
    PRIMARY KEY (student_id, course_id)
);

-- One row per (student, lecture). Rows are updated by passing quiz
-- attempts but never deleted.
CREATE TABLE IF NOT EXISTS progress (
    student_id   TEXT NOT NULL,
    course_id    TEXT NOT NULL REFERENCES courses(course_id),
    lecture_id   TEXT NOT NULL REFERENCES lectures(lecture_id),
    completed    INTEGER NOT NULL,
    score        INTEGER CHECK (score BETWEEN 0 AND 100),
    completed_at TEXT NOT NULL,
    PRIMARY KEY (student_id, lecture_id)
);

-- Strictly append-only.
CREATE TABLE IF NOT EXISTS quiz_attempts (
    attempt_id   TEXT PRIMARY KEY,
    student_id   TEXT NOT NULL,
    lecture_id   TEXT NOT NULL REFERENCES lectures(lecture_id),
    answers      TEXT NOT NULL,     -- JSON array of option indices
    score        INTEGER NOT NULL CHECK (score BETWEEN 0 AND 100),
    passed       INTEGER NOT NULL,
    attempted_at TEXT NOT NULL
);

CREATE TRIGGER IF NOT EXISTS quiz_attempts_immutable
BEFORE UPDATE ON quiz_attempts
BEGIN
    SELECT RAISE(ABORT, 'quiz attempts are immutable');
END;

CREATE TRIGGER IF NOT EXISTS quiz_attempts_undeletable
BEFORE DELETE ON quiz_attempts
BEGIN
    SELECT RAISE(ABORT, 'quiz attempts are immutable');
END;

CREATE TRIGGER IF NOT EXISTS progress_undeletable
BEFORE DELETE ON progress
BEGIN
    SELECT RAISE(ABORT, 'progress records are never deleted');
END;

CREATE INDEX IF NOT EXISTS courses_instructor_idx   ON courses(instructor_id);
CREATE INDEX IF NOT EXISTS enrollments_course_idx  ON enrollments(course_id);
CREATE INDEX IF NOT EXISTS progress_course_idx     ON progress(student_id, course_id);
CREATE INDEX IF NOT EXISTS attempts_student_idx    ON quiz_attempts(student_id, lecture_id);

PRAGMA user_version = 1;
";
