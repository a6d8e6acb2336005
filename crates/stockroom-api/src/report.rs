//! Handler for `GET /api/inventory/report`.
//!
//! Query parameters: `reportType` (required), `category`, `dateFrom`,
//! `dateTo` (calendar days, `YYYY-MM-DD`). An unknown report type or an
//! unparseable date is a 400; filter semantics live in
//! [`stockroom_core::report`] and the store's query builder.

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use stockroom_core::{
  Error as CoreError,
  report::{Report, ReportQuery, ReportType},
  store::InventoryStore,
};

use crate::{AppState, auth::CurrentUser, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ReportParams {
  #[serde(rename = "reportType")]
  pub report_type: Option<String>,
  pub category:    Option<String>,
  #[serde(rename = "dateFrom")]
  pub date_from:   Option<String>,
  #[serde(rename = "dateTo")]
  pub date_to:     Option<String>,
}

fn parse_day(value: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
  value
    .filter(|s| !s.is_empty())
    .map(|s| {
      NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ApiError(CoreError::Validation(format!("invalid date: {s:?}"))))
    })
    .transpose()
}

/// `GET /api/inventory/report`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  CurrentUser(principal): CurrentUser,
  Query(params): Query<ReportParams>,
) -> Result<Json<Report>, ApiError>
where
  S: InventoryStore,
{
  let report_type: ReportType = params.report_type.as_deref().unwrap_or("").parse()?;

  let query = ReportQuery {
    report_type,
    category: params.category,
    date_from: parse_day(params.date_from.as_deref())?,
    date_to: parse_day(params.date_to.as_deref())?,
  };

  Ok(Json(state.store.report(principal.id, &query).await?))
}
