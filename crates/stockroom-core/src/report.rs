//! Report types and per-report-type policy.
//!
//! A report is a pure view over the current item set: a title, ordered
//! header labels, row projections, and an optional summary. The report type
//! selects projection, ordering, and extra predicates; filters compose with
//! the mandatory owner scope in the store layer.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::{Error, Result};

// ─── Report type ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
  StockLevels,
  LowStock,
  InventoryValue,
}

impl FromStr for ReportType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "stock-levels" => Ok(ReportType::StockLevels),
      "low-stock" => Ok(ReportType::LowStock),
      "inventory-value" => Ok(ReportType::InventoryValue),
      other => Err(Error::Validation(format!("invalid report type: {other:?}"))),
    }
  }
}

impl ReportType {
  pub fn title(self) -> &'static str {
    match self {
      ReportType::StockLevels => "Current Stock Levels Report",
      ReportType::LowStock => "Low Stock Report",
      ReportType::InventoryValue => "Inventory Value Report",
    }
  }

  pub fn headers(self) -> &'static [&'static str] {
    match self {
      ReportType::StockLevels | ReportType::LowStock => {
        &["SKU", "Name", "Category", "Stock"]
      }
      ReportType::InventoryValue => {
        &["SKU", "Name", "Category", "Stock", "Price", "Total Value"]
      }
    }
  }
}

// ─── Query parameters ────────────────────────────────────────────────────────

/// Parameters for report generation. All filters are optional and are
/// AND-ed with the owner scope.
#[derive(Debug, Clone)]
pub struct ReportQuery {
  pub report_type: ReportType,
  pub category:    Option<String>,
  pub date_from:   Option<NaiveDate>,
  pub date_to:     Option<NaiveDate>,
}

impl ReportQuery {
  /// The category equality filter, with the `"all"` sentinel (and empty
  /// strings) treated as absent.
  pub fn category_filter(&self) -> Option<&str> {
    match self.category.as_deref() {
      None | Some("all") | Some("") => None,
      Some(c) => Some(c),
    }
  }

  /// Inclusive lower bound on `created_at`: start of the given day.
  pub fn created_from(&self) -> Option<DateTime<Utc>> {
    self.date_from.map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
  }

  /// Inclusive upper bound on `created_at`: the day is widened to its last
  /// instant (23:59:59.999) so same-day records are included.
  pub fn created_to(&self) -> Option<DateTime<Utc>> {
    self
      .date_to
      .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
      .map(|ndt| ndt.and_utc())
  }
}

// ─── Report view ─────────────────────────────────────────────────────────────

/// One row projection. `price` and `total_value` are present only for the
/// inventory-value report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
  pub sku:         String,
  pub name:        String,
  pub category:    String,
  pub stock:       i64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub price:       Option<f64>,
  #[serde(rename = "totalValue", skip_serializing_if = "Option::is_none")]
  pub total_value: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
  pub label: String,
  pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
  pub title:   String,
  pub headers: Vec<String>,
  pub items:   Vec<ReportRow>,
  pub summary: Option<ReportSummary>,
}
