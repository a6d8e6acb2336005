//! Error taxonomy for Stockroom.
//!
//! Every layer speaks this vocabulary: the store maps constraint violations
//! and zero-row writes into it, the API maps it onto HTTP status codes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// No valid principal; the request never reaches a data operation.
  #[error("unauthenticated")]
  Unauthenticated,

  /// Missing or malformed input. The caller corrects and retries.
  #[error("validation error: {0}")]
  Validation(String),

  /// Uniqueness violation (SKU or email), surfaced from the storage
  /// constraint rather than pre-checked.
  #[error("conflict: {0}")]
  Conflict(String),

  /// Target record absent, or owned by a different principal. The two cases
  /// are deliberately indistinguishable.
  #[error("not found")]
  NotFound,

  /// The underlying store failed for any other reason. Never retried here.
  #[error("storage error: {0}")]
  Storage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
