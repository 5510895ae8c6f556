//! Extractor for the principal resolved by the transport layer.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use lyceum_core::principal::Principal;

/// The caller of a request: the [`Principal`] an upstream layer stored in the
/// request extensions, or `None` for an anonymous request.
///
/// Extraction never fails. Whether anonymity is acceptable is decided by the
/// engine operation the handler calls.
#[derive(Debug, Clone, Default)]
pub struct Caller(pub Option<Principal>);

impl Caller {
  pub fn principal(&self) -> Option<&Principal> { self.0.as_ref() }
}

impl<S> FromRequestParts<S> for Caller
where
  S: Send + Sync,
{
  type Rejection = Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    Ok(Caller(parts.extensions.get::<Principal>().cloned()))
  }
}
