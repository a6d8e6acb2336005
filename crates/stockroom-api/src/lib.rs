//! JSON REST API for Stockroom.
//!
//! Exposes an axum [`Router`] backed by any
//! [`stockroom_core::store::InventoryStore`]. Registration and login are
//! public; every inventory route requires a bearer session and operates
//! only on the authenticated principal's records.

pub mod auth;
pub mod error;
pub mod items;
pub mod report;
pub mod stats;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post, put},
};
use serde::Deserialize;
use stockroom_core::store::InventoryStore;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// `STOCKROOM_` environment.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: InventoryStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: InventoryStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Public
    .route("/api/register", post(auth::register::<S>))
    .route("/api/login", post(auth::login::<S>))
    // Bearer-authenticated
    .route("/api/inventory", get(items::list::<S>).post(items::create::<S>))
    .route("/api/inventory/stats", get(stats::handler::<S>))
    .route("/api/inventory/report", get(report::handler::<S>))
    .route(
      "/api/inventory/{id}",
      put(items::update::<S>).delete(items::remove::<S>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────
