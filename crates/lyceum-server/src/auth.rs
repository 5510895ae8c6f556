//! HTTP Basic authentication resolving the request's [`Principal`].
//!
//! A request without an `Authorization` header continues anonymously; the
//! engine decides whether the operation needs a principal. A header that is
//! present but does not match a configured user is rejected here.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  extract::{Request, State},
  http::{HeaderMap, header},
  middleware::Next,
  response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use lyceum_core::principal::{Principal, Role};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::Error};

/// One account allowed to sign in.
#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  pub user_id:       Uuid,
  pub role:          Role,
}

/// The set of accounts accepted by this server instance.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
  pub users: Vec<UserConfig>,
}

impl AuthConfig {
  pub fn new(users: Vec<UserConfig>) -> Self { Self { users } }

  fn find(&self, username: &str) -> Option<&UserConfig> {
    self.users.iter().find(|u| u.username == username)
  }
}

/// Resolve the principal from request headers.
///
/// Returns `Ok(None)` when no `Authorization` header is present.
pub fn verify_auth(
  headers: &HeaderMap,
  config: &AuthConfig,
) -> Result<Option<Principal>, Error> {
  let Some(header_val) = headers.get(header::AUTHORIZATION) else {
    return Ok(None);
  };
  let header_val = header_val.to_str().map_err(|_| Error::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(Error::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| Error::Unauthorized)?;
  let creds = std::str::from_utf8(&decoded).map_err(|_| Error::Unauthorized)?;

  let (username, password) =
    creds.split_once(':').ok_or(Error::Unauthorized)?;

  let user = config.find(username).ok_or(Error::Unauthorized)?;

  let parsed_hash =
    PasswordHash::new(&user.password_hash).map_err(|_| Error::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| Error::Unauthorized)?;

  Ok(Some(Principal {
    user_id: user.user_id,
    role:    user.role,
  }))
}

/// Middleware placing the resolved [`Principal`] in the request extensions.
pub async fn authenticate<S>(
  State(state): State<AppState<S>>,
  mut req: Request,
  next: Next,
) -> Result<Response, Error>
where
  S: Send + Sync + 'static,
{
  match verify_auth(req.headers(), &state.auth) {
    Ok(Some(principal)) => {
      tracing::debug!(user = %principal.user_id, role = ?principal.role, "authenticated");
      req.extensions_mut().insert(principal);
    }
    Ok(None) => {}
    Err(e) => {
      tracing::warn!(uri = %req.uri(), "rejected credentials");
      return Err(e);
    }
  }
  Ok(next.run(req).await)
}
