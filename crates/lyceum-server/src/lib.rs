//! HTTP server for Lyceum.
//!
//! Wraps the [`lyceum_api`] router with Basic authentication and request
//! tracing, backed by any [`CourseStore`].

pub mod auth;
pub mod error;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, middleware, routing::get};
use lyceum_core::{Engine, store::CourseStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::{AuthConfig, UserConfig};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  #[serde(default)]
  pub users:      Vec<UserConfig>,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the middleware stack.
pub struct AppState<S> {
  pub engine: Arc<Engine<S>>,
  pub auth:   Arc<AuthConfig>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      engine: self.engine.clone(),
      auth:   self.auth.clone(),
    }
  }
}

impl<S: CourseStore> AppState<S> {
  pub fn new(store: S, users: Vec<UserConfig>) -> Self {
    Self {
      engine: Arc::new(Engine::new(store)),
      auth:   Arc::new(AuthConfig::new(users)),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the server's axum [`Router`]: the JSON API under `/api` plus
/// `/health`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CourseStore + 'static,
{
  Router::new()
    .route("/health", get(health))
    .nest("/api", lyceum_api::api_router(state.engine.clone()))
    .layer(middleware::from_fn_with_state(
      state,
      auth::authenticate::<S>,
    ))
    .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str { "ok" }

// ─── Integration tests ────────────────────────────────────────────────────────
