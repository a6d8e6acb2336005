//! Mapping from SQLite failures into the shared error taxonomy.
//!
//! Constraint violations are surfaced as `Conflict` with a call-site
//! message, so each table's uniqueness rule produces a meaningful error
//! without being pre-checked (avoiding a check-then-insert race).

use stockroom_core::Error;

fn is_constraint_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

/// Map a write failure. `conflict` names the violated uniqueness rule from
/// the caller's perspective ("SKU already exists." etc.).
pub(crate) fn write_error(err: tokio_rusqlite::Error, conflict: &str) -> Error {
  if is_constraint_violation(&err) {
    Error::Conflict(conflict.to_owned())
  } else {
    Error::Storage(err.to_string())
  }
}

/// Map a read failure; reads have no conflict case.
pub(crate) fn read_error(err: tokio_rusqlite::Error) -> Error {
  Error::Storage(err.to_string())
}
