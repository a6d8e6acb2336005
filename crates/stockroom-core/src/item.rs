//! Inventory item types and field validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A tracked SKU, owned by exactly one user.
///
/// `sku` is globally unique across all owners. Timestamps are
/// server-assigned; `updated_at` is refreshed on every mutation, so
/// `updated_at >= created_at` always holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
  pub id:         i64,
  #[serde(rename = "userId")]
  pub owner_id:   i64,
  pub name:       String,
  pub sku:        String,
  pub category:   String,
  pub stock:      i64,
  pub price:      f64,
  #[serde(rename = "createdAt")]
  pub created_at: DateTime<Utc>,
  #[serde(rename = "updatedAt")]
  pub updated_at: DateTime<Utc>,
}

/// Validated input for create and update. Construct via [`ItemDraft::new`];
/// a draft that exists has already passed field validation.
#[derive(Debug, Clone)]
pub struct ItemDraft {
  pub name:     String,
  pub sku:      String,
  pub category: String,
  pub stock:    i64,
  pub price:    f64,
}

impl ItemDraft {
  /// Validate field shape: all text fields non-empty, stock and price
  /// non-negative (and price finite). Rejected drafts never reach storage.
  pub fn new(
    name: String,
    sku: String,
    category: String,
    stock: i64,
    price: f64,
  ) -> Result<Self> {
    if name.trim().is_empty() {
      return Err(Error::Validation("name must not be empty".into()));
    }
    if sku.trim().is_empty() {
      return Err(Error::Validation("sku must not be empty".into()));
    }
    if category.trim().is_empty() {
      return Err(Error::Validation("category must not be empty".into()));
    }
    if stock < 0 {
      return Err(Error::Validation("stock must be non-negative".into()));
    }
    if !price.is_finite() || price < 0.0 {
      return Err(Error::Validation("price must be non-negative".into()));
    }
    Ok(ItemDraft { name, sku, category, stock, price })
  }
}
