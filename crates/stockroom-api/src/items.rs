//! Handlers for `/api/inventory` CRUD endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/api/inventory` | All items owned by the caller |
//! | `POST`   | `/api/inventory` | 201 with the created item |
//! | `PUT`    | `/api/inventory/{id}` | 404 covers absent AND not-owned |
//! | `DELETE` | `/api/inventory/{id}` | likewise |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use stockroom_core::{
  Error as CoreError,
  item::{Item, ItemDraft},
  store::InventoryStore,
};

use crate::{AppState, auth::CurrentUser, error::ApiError};

/// Permissive body shape: field presence is checked here so that a missing
/// field is a 400 with a helpful message, not a deserialisation rejection.
#[derive(Debug, Deserialize)]
pub struct ItemBody {
  pub name:     Option<String>,
  pub sku:      Option<String>,
  pub category: Option<String>,
  pub stock:    Option<i64>,
  pub price:    Option<f64>,
}

impl ItemBody {
  fn into_draft(self) -> Result<ItemDraft, CoreError> {
    let (Some(name), Some(sku), Some(category), Some(stock), Some(price)) =
      (self.name, self.sku, self.category, self.stock, self.price)
    else {
      return Err(CoreError::Validation(
        "Please provide all required fields: name, sku, category, stock, price.".into(),
      ));
    };
    ItemDraft::new(name, sku, category, stock, price)
  }
}

/// `GET /api/inventory`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentUser(principal): CurrentUser,
) -> Result<Json<Vec<Item>>, ApiError>
where
  S: InventoryStore,
{
  Ok(Json(state.store.list_items(principal.id).await?))
}

/// `POST /api/inventory`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentUser(principal): CurrentUser,
  Json(body): Json<ItemBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InventoryStore,
{
  let draft = body.into_draft()?;
  let item = state.store.create_item(principal.id, draft).await?;
  Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /api/inventory/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  CurrentUser(principal): CurrentUser,
  Path(id): Path<i64>,
  Json(body): Json<ItemBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: InventoryStore,
{
  let draft = body.into_draft()?;
  state.store.update_item(principal.id, id, draft).await?;
  Ok(Json(json!({ "message": "Item updated successfully." })))
}

/// `DELETE /api/inventory/{id}`
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  CurrentUser(principal): CurrentUser,
  Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: InventoryStore,
{
  state.store.delete_item(principal.id, id).await?;
  Ok(Json(json!({ "message": "Item deleted successfully." })))
}
