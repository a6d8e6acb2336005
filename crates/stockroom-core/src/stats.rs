//! Aggregate statistics over one principal's item set.

use serde::Serialize;

/// Fixed boundary between "low" and "in-stock". Items at exactly zero stock
/// count as out-of-stock, never low-stock, so the two counters are disjoint.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Four counters computed on demand over the live record set.
///
/// Each counter is derived independently (see the store implementation), so
/// a snapshot taken under concurrent writes may be mutually inconsistent
/// while each value is individually correct.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatsSnapshot {
  #[serde(rename = "totalItems")]
  pub total_items:  u64,
  #[serde(rename = "lowStock")]
  pub low_stock:    u64,
  #[serde(rename = "outOfStock")]
  pub out_of_stock: u64,
  pub categories:   u64,
}
