//! Registration, login, and the bearer-session extractor.
//!
//! Passwords are hashed with argon2 (PHC strings). Login issues an opaque
//! 32-byte random token; only its SHA-256 fingerprint is persisted, with a
//! 24-hour expiry. [`CurrentUser`] resolves `Authorization: Bearer <token>`
//! back to a [`Principal`] and rejects everything else with 401 before any
//! data operation runs.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  Json,
  extract::{FromRequestParts, State},
  http::{StatusCode, header, request::Parts},
  response::IntoResponse,
};
use chrono::{Duration, Utc};
use rand_core::{OsRng, RngCore as _};
use serde::Deserialize;
use serde_json::json;
use sha2::{Digest as _, Sha256};

use stockroom_core::{
  Error as CoreError,
  store::InventoryStore,
  user::{NewUser, Principal, Session},
};

use crate::{AppState, error::ApiError};

/// Sessions expire this long after login.
const SESSION_TTL_HOURS: i64 = 24;

// ─── Password & token helpers ────────────────────────────────────────────────

fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| ApiError(CoreError::Storage(format!("password hashing failed: {e}"))))
}

fn verify_password(password: &str, phc: &str) -> Result<(), ApiError> {
  let parsed = PasswordHash::new(phc).map_err(|_| ApiError(CoreError::Unauthenticated))?;
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .map_err(|_| ApiError(CoreError::Unauthenticated))
}

fn issue_token() -> String {
  let mut bytes = [0u8; 32];
  OsRng.fill_bytes(&mut bytes);
  hex::encode(bytes)
}

/// The stored form of a token. Leaking the sessions table must not leak
/// usable credentials.
pub(crate) fn fingerprint(token: &str) -> String {
  hex::encode(Sha256::digest(token.as_bytes()))
}

// ─── Register ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub name:     Option<String>,
  pub email:    Option<String>,
  pub password: Option<String>,
}

/// `POST /api/register`
pub async fn register<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InventoryStore,
{
  let (name, email, password) = match (body.name, body.email, body.password) {
    (Some(n), Some(e), Some(p)) if !n.is_empty() && !e.is_empty() && !p.is_empty() => {
      (n, e, p)
    }
    _ => {
      return Err(ApiError(CoreError::Validation(
        "Please provide name, email, and password.".into(),
      )));
    }
  };

  let password_hash = hash_password(&password)?;
  let user = state
    .store
    .create_user(NewUser { name, email, password_hash })
    .await?;

  tracing::info!(user_id = user.id, "registered user");
  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "User registered successfully", "userId": user.id })),
  ))
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    Option<String>,
  pub password: Option<String>,
}

/// `POST /api/login`
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: InventoryStore,
{
  let (email, password) = match (body.email, body.password) {
    (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
    _ => {
      return Err(ApiError(CoreError::Validation(
        "Please provide email and password.".into(),
      )));
    }
  };

  let record = state
    .store
    .find_user_by_email(&email)
    .await?
    .ok_or(ApiError(CoreError::Unauthenticated))?;
  verify_password(&password, &record.password_hash)?;

  let token = issue_token();
  state
    .store
    .create_session(Session {
      token_hash: fingerprint(&token),
      user_id:    record.user.id,
      expires_at: Utc::now() + Duration::hours(SESSION_TTL_HOURS),
    })
    .await?;

  let principal = Principal::from(record.user);
  Ok(Json(json!({
    "message": "Login successful",
    "token": token,
    "user": principal,
  })))
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// Present in a handler's arguments means the request carried a live bearer
/// session; carries the resolved principal.
pub struct CurrentUser(pub Principal);

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: InventoryStore + Clone + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let header_val = parts
      .headers
      .get(header::AUTHORIZATION)
      .and_then(|v| v.to_str().ok())
      .ok_or(ApiError(CoreError::Unauthenticated))?;

    let token = header_val
      .strip_prefix("Bearer ")
      .ok_or(ApiError(CoreError::Unauthenticated))?;

    let principal = state
      .store
      .principal_for_session(&fingerprint(token), Utc::now())
      .await?
      .ok_or(ApiError(CoreError::Unauthenticated))?;

    Ok(CurrentUser(principal))
  }
}
