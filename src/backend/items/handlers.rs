/**
 * Item Handlers
 *
 * HTTP handlers for the `/items` catalog routes, all behind the auth
 * middleware.
 */

use axum::{extract::State, http::StatusCode, Json};

use crate::backend::error::BackendError;
use crate::backend::items::service::ItemService;
use crate::backend::middleware::{AuthUser, EntityId, JsonBody};
use crate::shared::model::{CreateItemRequest, Item, ItemUpdate, MessageResponse};

pub async fn get_items(State(items): State<ItemService>) -> Result<Json<Vec<Item>>, BackendError> {
    Ok(Json(items.all().await?))
}

pub async fn get_item(
    State(items): State<ItemService>,
    EntityId(id): EntityId,
) -> Result<Json<Item>, BackendError> {
    Ok(Json(items.get(id).await?))
}

pub async fn create_item(
    State(items): State<ItemService>,
    JsonBody(request): JsonBody<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>), BackendError> {
    let item = items.create(request).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn modify_item(
    State(items): State<ItemService>,
    EntityId(id): EntityId,
    JsonBody(update): JsonBody<ItemUpdate>,
) -> Result<Json<Item>, BackendError> {
    Ok(Json(items.modify(id, update).await?))
}

/// Delete a catalog item; lists that embed it lose the entry
pub async fn delete_item(
    State(items): State<ItemService>,
    EntityId(id): EntityId,
) -> Result<Json<MessageResponse>, BackendError> {
    let item = items.delete(id).await?;
    Ok(Json(MessageResponse::new(format!("{} deleted successfully", item.name))))
}

/// Catalog items referenced by a list the caller can see
pub async fn get_items_of_list(
    AuthUser(user): AuthUser,
    State(items): State<ItemService>,
    EntityId(list_id): EntityId,
) -> Result<Json<Vec<Item>>, BackendError> {
    Ok(Json(items.items_of_list(user.user_id, list_id).await?))
}
