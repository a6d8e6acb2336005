//! User identity types.
//!
//! A [`User`] is the persisted identity row; a [`Principal`] is the verified
//! acting identity attached to a request. The core trusts a `Principal`
//! without re-verification — issuing one is the auth layer's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account. The credential hash is never serialised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id:    i64,
  pub name:  String,
  pub email: String,
}

/// Input for registration; `password_hash` is an argon2 PHC string.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name:          String,
  pub email:         String,
  pub password_hash: String,
}

/// A stored user together with its credential hash, for login verification.
#[derive(Debug, Clone)]
pub struct UserRecord {
  pub user:          User,
  pub password_hash: String,
}

/// The authenticated identity on whose behalf an operation executes.
///
/// Every query touching inventory is scoped to `id` — this is the sole
/// isolation mechanism between tenants.
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
  pub id:    i64,
  pub name:  String,
  pub email: String,
}

impl From<User> for Principal {
  fn from(u: User) -> Self {
    Principal { id: u.id, name: u.name, email: u.email }
  }
}

/// A bearer session: the token itself is never stored, only its SHA-256
/// fingerprint.
#[derive(Debug, Clone)]
pub struct Session {
  pub token_hash: String,
  pub user_id:    i64,
  pub expires_at: DateTime<Utc>,
}
