//! [`SqliteStore`] — the SQLite implementation of [`InventoryStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension as _, params_from_iter, types::Value};
use stockroom_core::{
  Error, Result,
  item::{Item, ItemDraft},
  report::{Report, ReportQuery, ReportRow, ReportSummary, ReportType},
  stats::{LOW_STOCK_THRESHOLD, StatsSnapshot},
  store::{InventoryStore, WriteOutcome},
  user::{NewUser, Principal, Session, User, UserRecord},
};

use crate::{
  encode::{RawItem, encode_dt},
  error::{read_error, write_error},
  query::WhereClause,
  schema::SCHEMA,
};

const ITEM_COLUMNS: &str =
  "id, owner_id, name, sku, category, stock, price, created_at, updated_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Stockroom store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Lifecycle
/// is `open → serve requests → drop`; each test opens its own in-memory
/// instance.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(read_error)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(read_error)?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(read_error)
  }

  /// Execute an INSERT and report the generated row id.
  async fn exec_insert(
    &self,
    sql: &'static str,
    params: Vec<Value>,
    conflict: &'static str,
  ) -> Result<WriteOutcome> {
    self
      .conn
      .call(move |conn| {
        let affected = conn.execute(sql, params_from_iter(params))?;
        Ok(WriteOutcome {
          inserted_id:   Some(conn.last_insert_rowid()),
          affected_rows: affected,
        })
      })
      .await
      .map_err(|e| write_error(e, conflict))
  }

  /// Execute an UPDATE or DELETE and report the affected-row count.
  async fn exec_write(
    &self,
    sql: &'static str,
    params: Vec<Value>,
    conflict: &'static str,
  ) -> Result<WriteOutcome> {
    self
      .conn
      .call(move |conn| {
        let affected = conn.execute(sql, params_from_iter(params))?;
        Ok(WriteOutcome { inserted_id: None, affected_rows: affected })
      })
      .await
      .map_err(|e| write_error(e, conflict))
  }

  /// Run a single scoped COUNT query.
  async fn count(&self, sql: &'static str, params: Vec<Value>) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(sql, params_from_iter(params), |row| row.get(0))?)
      })
      .await
      .map_err(read_error)?;
    Ok(n.max(0) as u64)
  }
}

// ─── InventoryStore impl ─────────────────────────────────────────────────────

impl InventoryStore for SqliteStore {
  // ── Users & sessions ──────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> Result<User> {
    let outcome = self
      .exec_insert(
        "INSERT INTO users (name, email, password_hash) VALUES (?1, ?2, ?3)",
        vec![
          input.name.clone().into(),
          input.email.clone().into(),
          input.password_hash.into(),
        ],
        "Email already in use.",
      )
      .await?;

    let id = outcome
      .inserted_id
      .ok_or_else(|| Error::Storage("insert reported no row id".into()))?;

    Ok(User { id, name: input.name, email: input.email })
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
    let email = email.to_owned();

    let row: Option<(i64, String, String, String)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, email, password_hash FROM users WHERE email = ?1",
              rusqlite::params![email],
              |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
              },
            )
            .optional()?,
        )
      })
      .await
      .map_err(read_error)?;

    Ok(row.map(|(id, name, email, password_hash)| UserRecord {
      user: User { id, name, email },
      password_hash,
    }))
  }

  async fn create_session(&self, session: Session) -> Result<()> {
    self
      .exec_insert(
        "INSERT INTO sessions (token_hash, user_id, expires_at) VALUES (?1, ?2, ?3)",
        vec![
          session.token_hash.into(),
          session.user_id.into(),
          encode_dt(session.expires_at).into(),
        ],
        "session token already exists",
      )
      .await?;
    Ok(())
  }

  async fn principal_for_session(
    &self,
    token_hash: &str,
    now: DateTime<Utc>,
  ) -> Result<Option<Principal>> {
    let token_hash = token_hash.to_owned();
    let now_str = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT u.id, u.name, u.email
               FROM sessions s
               JOIN users u ON u.id = s.user_id
               WHERE s.token_hash = ?1 AND s.expires_at > ?2",
              rusqlite::params![token_hash, now_str],
              |row| {
                Ok(Principal {
                  id:    row.get(0)?,
                  name:  row.get(1)?,
                  email: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await
      .map_err(read_error)
  }

  // ── Items ─────────────────────────────────────────────────────────────────

  async fn create_item(&self, owner: i64, draft: ItemDraft) -> Result<Item> {
    let now = Utc::now();
    let now_str = encode_dt(now);

    let outcome = self
      .exec_insert(
        "INSERT INTO items (owner_id, name, sku, category, stock, price, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        vec![
          owner.into(),
          draft.name.clone().into(),
          draft.sku.clone().into(),
          draft.category.clone().into(),
          draft.stock.into(),
          draft.price.into(),
          now_str.clone().into(),
          now_str.into(),
        ],
        "SKU already exists.",
      )
      .await?;

    let id = outcome
      .inserted_id
      .ok_or_else(|| Error::Storage("insert reported no row id".into()))?;

    Ok(Item {
      id,
      owner_id:   owner,
      name:       draft.name,
      sku:        draft.sku,
      category:   draft.category,
      stock:      draft.stock,
      price:      draft.price,
      created_at: now,
      updated_at: now,
    })
  }

  async fn list_items(&self, owner: i64) -> Result<Vec<Item>> {
    let raws: Vec<RawItem> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ITEM_COLUMNS} FROM items WHERE owner_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner], |row| RawItem::read(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(read_error)?;

    raws.into_iter().map(RawItem::into_item).collect()
  }

  async fn update_item(&self, owner: i64, id: i64, draft: ItemDraft) -> Result<()> {
    let now_str = encode_dt(Utc::now());

    let outcome = self
      .exec_write(
        "UPDATE items
         SET name = ?1, sku = ?2, category = ?3, stock = ?4, price = ?5, updated_at = ?6
         WHERE id = ?7 AND owner_id = ?8",
        vec![
          draft.name.into(),
          draft.sku.into(),
          draft.category.into(),
          draft.stock.into(),
          draft.price.into(),
          now_str.into(),
          id.into(),
          owner.into(),
        ],
        "SKU already exists.",
      )
      .await?;

    // Absent and not-owned are indistinguishable on purpose.
    if outcome.affected_rows == 0 {
      return Err(Error::NotFound);
    }
    Ok(())
  }

  async fn delete_item(&self, owner: i64, id: i64) -> Result<()> {
    let outcome = self
      .exec_write(
        "DELETE FROM items WHERE id = ?1 AND owner_id = ?2",
        vec![id.into(), owner.into()],
        "constraint violation",
      )
      .await?;

    if outcome.affected_rows == 0 {
      return Err(Error::NotFound);
    }
    Ok(())
  }

  // ── Aggregates ────────────────────────────────────────────────────────────

  async fn stats(&self, owner: i64) -> Result<StatsSnapshot> {
    // Four independent scoped queries, issued sequentially and not wrapped
    // in a transaction. A concurrent write between them can skew the
    // counters relative to one another while each stays individually
    // correct.
    let total_items = self
      .count("SELECT COUNT(*) FROM items WHERE owner_id = ?1", vec![owner.into()])
      .await?;
    let low_stock = self
      .count(
        "SELECT COUNT(*) FROM items WHERE owner_id = ?1 AND stock > 0 AND stock < ?2",
        vec![owner.into(), LOW_STOCK_THRESHOLD.into()],
      )
      .await?;
    let out_of_stock = self
      .count(
        "SELECT COUNT(*) FROM items WHERE owner_id = ?1 AND stock = 0",
        vec![owner.into()],
      )
      .await?;
    let categories = self
      .count(
        "SELECT COUNT(DISTINCT category) FROM items WHERE owner_id = ?1",
        vec![owner.into()],
      )
      .await?;

    Ok(StatsSnapshot { total_items, low_stock, out_of_stock, categories })
  }

  async fn report(&self, owner: i64, query: &ReportQuery) -> Result<Report> {
    let mut scope = WhereClause::new();
    scope.push("owner_id", "=", owner);

    if let Some(category) = query.category_filter() {
      scope.push("category", "=", category.to_owned());
    }
    if let Some(from) = query.created_from() {
      scope.push("created_at", ">=", encode_dt(from));
    }
    if let Some(to) = query.created_to() {
      scope.push("created_at", "<=", encode_dt(to));
    }

    let report_type = query.report_type;
    let (projection, ordering) = match report_type {
      ReportType::StockLevels => ("sku, name, category, stock", "name ASC"),
      ReportType::LowStock => {
        scope.push("stock", ">", 0i64);
        scope.push("stock", "<", LOW_STOCK_THRESHOLD);
        ("sku, name, category, stock", "stock ASC")
      }
      ReportType::InventoryValue => {
        ("sku, name, category, stock, price, stock * price", "name ASC")
      }
    };

    let sql = format!(
      "SELECT {projection} FROM items WHERE {} ORDER BY {ordering}",
      scope.sql()
    );
    let params = scope.into_params();
    let with_value = report_type == ReportType::InventoryValue;
    tracing::debug!(sql = %sql, "composed report query");

    let rows: Vec<ReportRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), |row| {
            Ok(ReportRow {
              sku:         row.get(0)?,
              name:        row.get(1)?,
              category:    row.get(2)?,
              stock:       row.get(3)?,
              price:       if with_value { Some(row.get(4)?) } else { None },
              total_value: if with_value { Some(row.get(5)?) } else { None },
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(read_error)?;

    // The summary covers exactly the returned rows — filters narrow it.
    let summary = match report_type {
      ReportType::InventoryValue => Some(ReportSummary {
        label: "Total Inventory Value".to_owned(),
        value: rows.iter().filter_map(|r| r.total_value).sum(),
      }),
      _ => None,
    };

    Ok(Report {
      title:   report_type.title().to_owned(),
      headers: report_type.headers().iter().map(|h| (*h).to_owned()).collect(),
      items:   rows,
      summary,
    })
  }
}
