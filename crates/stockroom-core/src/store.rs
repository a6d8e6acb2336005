//! The `InventoryStore` trait and write-result type.
//!
//! The trait is implemented by storage backends (e.g.
//! `stockroom-store-sqlite`). The API layer depends on this abstraction,
//! not on any concrete backend.
//!
//! Every item operation takes the owning principal's id and MUST conjoin
//! `owner_id = <principal>` to the query it issues — the scope predicate is
//! the only tenant-isolation mechanism in the system. A scoped update or
//! delete that affects zero rows reports [`Error::NotFound`](crate::Error),
//! whether the row is absent or owned by someone else.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  Result,
  item::{Item, ItemDraft},
  report::{Report, ReportQuery},
  stats::StatsSnapshot,
  user::{NewUser, Principal, Session, User, UserRecord},
};

/// The outcome of a single write statement, as reported by the adapter.
///
/// `inserted_id` is set only for inserts; `affected_rows` lets callers turn
/// a zero-row scoped mutation into `NotFound`.
#[derive(Debug, Clone, Copy)]
pub struct WriteOutcome {
  pub inserted_id:   Option<i64>,
  pub affected_rows: usize,
}

/// Abstraction over a Stockroom storage backend.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes (tokio with axum). Methods return the
/// shared [`Error`](crate::Error) taxonomy directly; backends map their
/// native failures into it at the call site.
pub trait InventoryStore: Send + Sync {
  // ── Users & sessions ──────────────────────────────────────────────────

  /// Register a new account. A duplicate email fails with `Conflict`.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User>> + Send + '_;

  /// Look up a user (with credential hash) for login verification.
  fn find_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<UserRecord>>> + Send + 'a;

  /// Persist a bearer session (token fingerprint + expiry).
  fn create_session(
    &self,
    session: Session,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// Resolve a token fingerprint to a principal. Expired or unknown
  /// sessions yield `None`.
  fn principal_for_session<'a>(
    &'a self,
    token_hash: &'a str,
    now: DateTime<Utc>,
  ) -> impl Future<Output = Result<Option<Principal>>> + Send + 'a;

  // ── Items ─────────────────────────────────────────────────────────────

  /// Persist a new item owned by `owner` and return it, including the
  /// generated id. A duplicate SKU (any owner) fails with `Conflict`.
  fn create_item(
    &self,
    owner: i64,
    draft: ItemDraft,
  ) -> impl Future<Output = Result<Item>> + Send + '_;

  /// Every item owned by `owner`. Order unspecified.
  fn list_items(
    &self,
    owner: i64,
  ) -> impl Future<Output = Result<Vec<Item>>> + Send + '_;

  /// Replace all mutable fields of the item, scoped by id AND owner, and
  /// refresh `updated_at`.
  fn update_item(
    &self,
    owner: i64,
    id: i64,
    draft: ItemDraft,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// Remove the item, scoped by id AND owner.
  fn delete_item(
    &self,
    owner: i64,
    id: i64,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Aggregates ────────────────────────────────────────────────────────

  /// Compute the four stat counters over `owner`'s items. The counters are
  /// independent queries, not one transaction; see the crate docs of the
  /// backend for the consistency trade-off.
  fn stats(
    &self,
    owner: i64,
  ) -> impl Future<Output = Result<StatsSnapshot>> + Send + '_;

  /// Build and execute a filtered report over `owner`'s items.
  fn report<'a>(
    &'a self,
    owner: i64,
    query: &'a ReportQuery,
  ) -> impl Future<Output = Result<Report>> + Send + 'a;
}
