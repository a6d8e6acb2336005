//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Duration, NaiveDate, Utc};
use stockroom_core::{
  Error,
  item::ItemDraft,
  report::{ReportQuery, ReportType},
  store::InventoryStore,
  user::{NewUser, Session, User},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

async fn user(s: &SqliteStore, email: &str) -> User {
  s.create_user(NewUser {
    name:          "Test User".into(),
    email:         email.into(),
    password_hash: "$argon2id$v=19$stub".into(),
  })
  .await
  .unwrap()
}

fn draft(name: &str, sku: &str, category: &str, stock: i64, price: f64) -> ItemDraft {
  ItemDraft::new(name.into(), sku.into(), category.into(), stock, price).unwrap()
}

fn report_query(report_type: ReportType) -> ReportQuery {
  ReportQuery { report_type, category: None, date_from: None, date_to: None }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Insert an item with an explicit creation timestamp, bypassing the
/// server-assigned clock so date-filter tests are deterministic.
async fn seed_item(
  s: &SqliteStore,
  owner: i64,
  name: &str,
  sku: &str,
  category: &str,
  stock: i64,
  price: f64,
  created_at: &str,
) {
  let name = name.to_owned();
  let sku = sku.to_owned();
  let category = category.to_owned();
  let created_at = created_at.to_owned();
  s.conn
    .call(move |conn| {
      conn.execute(
        "INSERT INTO items (owner_id, name, sku, category, stock, price, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        rusqlite::params![owner, name, sku, category, stock, price, created_at],
      )?;
      Ok(())
    })
    .await
    .unwrap();
}

// ─── Users & sessions ────────────────────────────────────────────────────────

#[tokio::test]
async fn create_user_and_find_by_email() {
  let s = store().await;

  let created = user(&s, "alice@example.com").await;
  assert!(created.id > 0);

  let record = s
    .find_user_by_email("alice@example.com")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(record.user.id, created.id);
  assert_eq!(record.user.email, "alice@example.com");
  assert_eq!(record.password_hash, "$argon2id$v=19$stub");
}

#[tokio::test]
async fn find_unknown_email_returns_none() {
  let s = store().await;
  assert!(s.find_user_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_conflicts() {
  let s = store().await;
  user(&s, "alice@example.com").await;

  let err = s
    .create_user(NewUser {
      name:          "Other".into(),
      email:         "alice@example.com".into(),
      password_hash: "hash".into(),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn session_resolves_to_principal() {
  let s = store().await;
  let u = user(&s, "alice@example.com").await;

  s.create_session(Session {
    token_hash: "fingerprint-1".into(),
    user_id:    u.id,
    expires_at: Utc::now() + Duration::hours(1),
  })
  .await
  .unwrap();

  let principal = s
    .principal_for_session("fingerprint-1", Utc::now())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(principal.id, u.id);
  assert_eq!(principal.email, "alice@example.com");

  assert!(
    s.principal_for_session("other-fingerprint", Utc::now())
      .await
      .unwrap()
      .is_none()
  );
}

#[tokio::test]
async fn expired_session_yields_none() {
  let s = store().await;
  let u = user(&s, "alice@example.com").await;

  s.create_session(Session {
    token_hash: "stale".into(),
    user_id:    u.id,
    expires_at: Utc::now() - Duration::hours(1),
  })
  .await
  .unwrap();

  assert!(
    s.principal_for_session("stale", Utc::now())
      .await
      .unwrap()
      .is_none()
  );
}

// ─── Item CRUD & isolation ───────────────────────────────────────────────────

#[tokio::test]
async fn create_item_assigns_id_and_owner() {
  let s = store().await;
  let u = user(&s, "alice@example.com").await;

  let item = s
    .create_item(u.id, draft("Widget", "W-1", "Electronics", 5, 9.99))
    .await
    .unwrap();
  assert!(item.id > 0);
  assert_eq!(item.owner_id, u.id);
  assert!(item.updated_at >= item.created_at);

  let listed = s.list_items(u.id).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].sku, "W-1");
}

#[tokio::test]
async fn list_is_scoped_to_owner() {
  let s = store().await;
  let a = user(&s, "a@example.com").await;
  let b = user(&s, "b@example.com").await;

  s.create_item(a.id, draft("Widget", "W-1", "Electronics", 5, 9.99))
    .await
    .unwrap();
  s.create_item(b.id, draft("Gadget", "G-1", "Electronics", 3, 4.50))
    .await
    .unwrap();

  let a_items = s.list_items(a.id).await.unwrap();
  assert_eq!(a_items.len(), 1);
  assert_eq!(a_items[0].sku, "W-1");

  let b_items = s.list_items(b.id).await.unwrap();
  assert_eq!(b_items.len(), 1);
  assert_eq!(b_items[0].sku, "G-1");
}

#[tokio::test]
async fn sku_is_unique_across_owners() {
  let s = store().await;
  let a = user(&s, "a@example.com").await;
  let b = user(&s, "b@example.com").await;

  s.create_item(a.id, draft("Widget", "W-1", "Electronics", 5, 9.99))
    .await
    .unwrap();

  let err = s
    .create_item(b.id, draft("Copycat", "W-1", "Toys", 1, 1.0))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));

  // The store retains only the first write.
  assert!(s.list_items(b.id).await.unwrap().is_empty());
  assert_eq!(s.list_items(a.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_replaces_fields_and_refreshes_timestamp() {
  let s = store().await;
  let u = user(&s, "alice@example.com").await;
  let item = s
    .create_item(u.id, draft("Widget", "W-1", "Electronics", 5, 9.99))
    .await
    .unwrap();

  s.update_item(u.id, item.id, draft("Widget XL", "W-1", "Electronics", 12, 14.99))
    .await
    .unwrap();

  let listed = s.list_items(u.id).await.unwrap();
  assert_eq!(listed[0].name, "Widget XL");
  assert_eq!(listed[0].stock, 12);
  assert_eq!(listed[0].price, 14.99);
  assert!(listed[0].updated_at >= listed[0].created_at);
}

#[tokio::test]
async fn update_by_non_owner_is_not_found() {
  let s = store().await;
  let a = user(&s, "a@example.com").await;
  let b = user(&s, "b@example.com").await;
  let item = s
    .create_item(a.id, draft("Widget", "W-1", "Electronics", 5, 9.99))
    .await
    .unwrap();

  let err = s
    .update_item(b.id, item.id, draft("Hijack", "W-1", "Electronics", 0, 0.0))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound));

  // A's record is untouched.
  let listed = s.list_items(a.id).await.unwrap();
  assert_eq!(listed[0].name, "Widget");
  assert_eq!(listed[0].stock, 5);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
  let s = store().await;
  let u = user(&s, "alice@example.com").await;

  let err = s
    .update_item(u.id, 9999, draft("Ghost", "G-0", "Misc", 1, 1.0))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound));
}

#[tokio::test]
async fn update_to_taken_sku_conflicts() {
  let s = store().await;
  let u = user(&s, "alice@example.com").await;
  s.create_item(u.id, draft("Widget", "W-1", "Electronics", 5, 9.99))
    .await
    .unwrap();
  let second = s
    .create_item(u.id, draft("Gadget", "G-1", "Electronics", 2, 3.0))
    .await
    .unwrap();

  let err = s
    .update_item(u.id, second.id, draft("Gadget", "W-1", "Electronics", 2, 3.0))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn delete_is_scoped_to_owner() {
  let s = store().await;
  let a = user(&s, "a@example.com").await;
  let b = user(&s, "b@example.com").await;
  let item = s
    .create_item(a.id, draft("Widget", "W-1", "Electronics", 5, 9.99))
    .await
    .unwrap();

  let err = s.delete_item(b.id, item.id).await.unwrap_err();
  assert!(matches!(err, Error::NotFound));
  assert_eq!(s.list_items(a.id).await.unwrap().len(), 1);

  s.delete_item(a.id, item.id).await.unwrap();
  assert!(s.list_items(a.id).await.unwrap().is_empty());

  let err = s.delete_item(a.id, item.id).await.unwrap_err();
  assert!(matches!(err, Error::NotFound));
}

// ─── Stats ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn stats_counters_are_disjoint_and_scoped() {
  let s = store().await;
  let a = user(&s, "a@example.com").await;
  let b = user(&s, "b@example.com").await;

  // stock profile: two out-of-stock, two low, two healthy; two categories.
  for (i, (stock, category)) in [
    (0, "Electronics"),
    (0, "Electronics"),
    (3, "Electronics"),
    (9, "Furniture"),
    (10, "Furniture"),
    (25, "Furniture"),
  ]
  .into_iter()
  .enumerate()
  {
    s.create_item(a.id, draft(&format!("Item {i}"), &format!("A-{i}"), category, stock, 1.0))
      .await
      .unwrap();
  }
  // Noise under another owner must not leak into A's stats.
  s.create_item(b.id, draft("Noise", "B-1", "Toys", 0, 1.0))
    .await
    .unwrap();

  let stats = s.stats(a.id).await.unwrap();
  assert_eq!(stats.total_items, 6);
  assert_eq!(stats.out_of_stock, 2);
  assert_eq!(stats.low_stock, 2);
  assert_eq!(stats.categories, 2);
  assert!(stats.out_of_stock + stats.low_stock <= stats.total_items);
}

#[tokio::test]
async fn stats_for_empty_owner_are_zero() {
  let s = store().await;
  let u = user(&s, "alice@example.com").await;

  let stats = s.stats(u.id).await.unwrap();
  assert_eq!(stats.total_items, 0);
  assert_eq!(stats.low_stock, 0);
  assert_eq!(stats.out_of_stock, 0);
  assert_eq!(stats.categories, 0);
}

// ─── Reports ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn stock_levels_report_orders_by_name() {
  let s = store().await;
  let u = user(&s, "alice@example.com").await;
  s.create_item(u.id, draft("Zebra", "Z-1", "Toys", 4, 1.0)).await.unwrap();
  s.create_item(u.id, draft("Anvil", "A-1", "Tools", 2, 1.0)).await.unwrap();
  s.create_item(u.id, draft("Mallet", "M-1", "Tools", 7, 1.0)).await.unwrap();

  let report = s
    .report(u.id, &report_query(ReportType::StockLevels))
    .await
    .unwrap();

  assert_eq!(report.title, "Current Stock Levels Report");
  assert_eq!(report.headers, vec!["SKU", "Name", "Category", "Stock"]);
  let names: Vec<_> = report.items.iter().map(|r| r.name.as_str()).collect();
  assert_eq!(names, vec!["Anvil", "Mallet", "Zebra"]);
  assert!(report.summary.is_none());
  assert!(report.items.iter().all(|r| r.price.is_none() && r.total_value.is_none()));
}

#[tokio::test]
async fn low_stock_report_applies_band_and_orders_by_stock() {
  let s = store().await;
  let u = user(&s, "alice@example.com").await;
  for (name, sku, stock) in [
    ("Empty", "S-0", 0),
    ("Scarce", "S-1", 3),
    ("Rare", "S-2", 1),
    ("Plenty", "S-3", 10),
    ("Edge", "S-4", 9),
  ] {
    s.create_item(u.id, draft(name, sku, "Misc", stock, 1.0)).await.unwrap();
  }

  let report = s
    .report(u.id, &report_query(ReportType::LowStock))
    .await
    .unwrap();

  // 0 is out-of-stock, 10 is healthy; only the open band (0, 10) remains.
  let stocks: Vec<_> = report.items.iter().map(|r| r.stock).collect();
  assert_eq!(stocks, vec![1, 3, 9]);
  assert_eq!(report.title, "Low Stock Report");
}

#[tokio::test]
async fn inventory_value_summary_covers_returned_rows_only() {
  let s = store().await;
  let u = user(&s, "alice@example.com").await;
  s.create_item(u.id, draft("Widget", "W-1", "Electronics", 5, 9.99)).await.unwrap();
  s.create_item(u.id, draft("Gadget", "G-1", "Electronics", 2, 100.0)).await.unwrap();
  s.create_item(u.id, draft("Chair", "C-1", "Furniture", 4, 50.0)).await.unwrap();

  let mut q = report_query(ReportType::InventoryValue);
  q.category = Some("Electronics".into());
  let report = s.report(u.id, &q).await.unwrap();

  assert_eq!(report.items.len(), 2);
  assert!(report.items.iter().all(|r| r.price.is_some() && r.total_value.is_some()));

  let summary = report.summary.unwrap();
  assert_eq!(summary.label, "Total Inventory Value");
  // 5 × 9.99 + 2 × 100.0, excluding the filtered-out Furniture row.
  assert!((summary.value - 249.95).abs() < 1e-9);
}

#[tokio::test]
async fn report_filters_compose_category_and_date_range() {
  let s = store().await;
  let u = user(&s, "alice@example.com").await;

  seed_item(&s, u.id, "In window", "E-1", "Electronics", 5, 1.0, "2024-01-15T12:00:00+00:00").await;
  seed_item(&s, u.id, "Same day", "E-2", "Electronics", 2, 1.0, "2024-01-31T12:00:00+00:00").await;
  seed_item(&s, u.id, "Too early", "E-3", "Electronics", 1, 1.0, "2023-12-31T23:59:59+00:00").await;
  seed_item(&s, u.id, "Too late", "E-4", "Electronics", 1, 1.0, "2024-02-01T00:00:00+00:00").await;
  seed_item(&s, u.id, "Wrong category", "F-1", "Furniture", 1, 1.0, "2024-01-15T12:00:00+00:00").await;

  let q = ReportQuery {
    report_type: ReportType::StockLevels,
    category:    Some("Electronics".into()),
    date_from:   Some(day(2024, 1, 1)),
    date_to:     Some(day(2024, 1, 31)),
  };
  let report = s.report(u.id, &q).await.unwrap();

  let skus: Vec<_> = report.items.iter().map(|r| r.sku.as_str()).collect();
  assert_eq!(skus, vec!["E-1", "E-2"]);
}

#[tokio::test]
async fn all_category_sentinel_disables_the_filter() {
  let s = store().await;
  let u = user(&s, "alice@example.com").await;
  s.create_item(u.id, draft("Widget", "W-1", "Electronics", 5, 1.0)).await.unwrap();
  s.create_item(u.id, draft("Chair", "C-1", "Furniture", 4, 1.0)).await.unwrap();

  let mut q = report_query(ReportType::StockLevels);
  q.category = Some("all".into());
  let report = s.report(u.id, &q).await.unwrap();
  assert_eq!(report.items.len(), 2);
}

#[tokio::test]
async fn report_is_scoped_to_owner() {
  let s = store().await;
  let a = user(&s, "a@example.com").await;
  let b = user(&s, "b@example.com").await;
  s.create_item(a.id, draft("Widget", "W-1", "Electronics", 5, 1.0)).await.unwrap();
  s.create_item(b.id, draft("Gadget", "G-1", "Electronics", 2, 1.0)).await.unwrap();

  let report = s
    .report(a.id, &report_query(ReportType::StockLevels))
    .await
    .unwrap();
  let skus: Vec<_> = report.items.iter().map(|r| r.sku.as_str()).collect();
  assert_eq!(skus, vec!["W-1"]);
}

// ─── Scenario round-trips ────────────────────────────────────────────────────

#[tokio::test]
async fn widget_lifecycle_across_principals() {
  let s = store().await;
  let a = user(&s, "a@example.com").await;
  let b = user(&s, "b@example.com").await;

  let item = s
    .create_item(a.id, draft("Widget", "W-1", "Electronics", 5, 9.99))
    .await
    .unwrap();

  let listed = s.list_items(a.id).await.unwrap();
  assert!(listed.iter().any(|i| i.id == item.id));

  let err = s
    .update_item(b.id, item.id, draft("Widget", "W-1", "Electronics", 1, 9.99))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound));

  s.delete_item(a.id, item.id).await.unwrap();
  assert!(s.list_items(a.id).await.unwrap().iter().all(|i| i.id != item.id));
}
