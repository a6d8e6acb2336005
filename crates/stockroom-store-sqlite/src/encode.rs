//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 UTC strings, which compare
//! correctly as text for the range predicates the report builder emits.

use chrono::{DateTime, Utc};
use stockroom_core::{Error, Result, item::Item};

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Storage(format!("date/time parse error: {e}")))
}

/// Raw values read directly from an `items` row.
pub struct RawItem {
  pub id:         i64,
  pub owner_id:   i64,
  pub name:       String,
  pub sku:        String,
  pub category:   String,
  pub stock:      i64,
  pub price:      f64,
  pub created_at: String,
  pub updated_at: String,
}

impl RawItem {
  pub fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawItem {
      id:         row.get(0)?,
      owner_id:   row.get(1)?,
      name:       row.get(2)?,
      sku:        row.get(3)?,
      category:   row.get(4)?,
      stock:      row.get(5)?,
      price:      row.get(6)?,
      created_at: row.get(7)?,
      updated_at: row.get(8)?,
    })
  }

  pub fn into_item(self) -> Result<Item> {
    Ok(Item {
      id:         self.id,
      owner_id:   self.owner_id,
      name:       self.name,
      sku:        self.sku,
      category:   self.category,
      stock:      self.stock,
      price:      self.price,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
