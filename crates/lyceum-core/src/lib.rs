//! Core types, rules, and trait definitions for the Lyceum course platform.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::CourseStore`]; the [`engine::Engine`]
//! layers the enrollment, progress, and quiz-grading rules on top of any such
//! backend.

pub mod course;
pub mod engine;
pub mod enrollment;
pub mod error;
pub mod lecture;
pub mod outline;
pub mod principal;
pub mod progress;
pub mod quiz;
pub mod store;

pub use engine::Engine;
pub use error::{Error, Result};
