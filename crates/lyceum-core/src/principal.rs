//! The resolved caller identity.
//!
//! Authentication happens at the transport boundary. Every engine operation
//! receives the result explicitly as an `Option<&Principal>`; `None` means the
//! caller could not be identified.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// The role a user holds, as reported by the external profile provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Student,
  Instructor,
}

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
  pub user_id: Uuid,
  pub role:    Role,
}

impl Principal {
  pub fn student(user_id: Uuid) -> Self { Self { user_id, role: Role::Student } }

  pub fn instructor(user_id: Uuid) -> Self {
    Self { user_id, role: Role::Instructor }
  }

  pub fn is_student(&self) -> bool { self.role == Role::Student }

  pub fn is_instructor(&self) -> bool { self.role == Role::Instructor }
}

/// Reject an unidentified caller with [`Error::NotAuthenticated`].
pub fn require(principal: Option<&Principal>) -> Result<&Principal> {
  principal.ok_or(Error::NotAuthenticated)
}
