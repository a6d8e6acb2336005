//! Handler for `GET /api/inventory/stats`.

use axum::{Json, extract::State};

use stockroom_core::{stats::StatsSnapshot, store::InventoryStore};

use crate::{AppState, auth::CurrentUser, error::ApiError};

/// `GET /api/inventory/stats`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  CurrentUser(principal): CurrentUser,
) -> Result<Json<StatsSnapshot>, ApiError>
where
  S: InventoryStore,
{
  Ok(Json(state.store.stats(principal.id).await?))
}
