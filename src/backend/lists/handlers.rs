/**
 * List Handlers
 *
 * HTTP handlers for the `/lists` routes. All of them sit behind the auth
 * middleware; the authenticated user is the actor of every operation.
 *
 * # Routes
 *
 * - `GET /lists` - Lists visible to the caller
 * - `GET /lists/{id}` - One list
 * - `POST /lists/create` - Create a list (201)
 * - `PUT /lists/modify/{id}` - Rename, complete or replace entries
 * - `PUT /lists/addUser/{id}` - Share with more users
 * - `PUT /lists/removeUser/{id}` - Take a user off the list
 * - `PUT /lists/addItem/{id}` - Append entries
 * - `DELETE /lists/removeItem/{id}` - Pull entries
 * - `DELETE /lists/delete/{id}` - Delete the list
 */

use axum::{extract::State, http::StatusCode, Json};

use crate::backend::error::BackendError;
use crate::backend::lists::service::ListService;
use crate::backend::middleware::{AuthUser, EntityId, JsonBody};
use crate::backend::sharing::Removal;
use crate::shared::model::{
    AddItemsRequest, AddMembersRequest, CreateListRequest, List, MessageResponse, ModifyListRequest,
    RemoveItemsRequest, RemoveMemberRequest,
};

pub async fn get_lists(
    AuthUser(user): AuthUser,
    State(lists): State<ListService>,
) -> Result<Json<Vec<List>>, BackendError> {
    Ok(Json(lists.visible(user.user_id).await?))
}

pub async fn get_list(
    AuthUser(user): AuthUser,
    State(lists): State<ListService>,
    EntityId(id): EntityId,
) -> Result<Json<List>, BackendError> {
    Ok(Json(lists.get(user.user_id, id).await?))
}

/// Create a list with the caller as admin
///
/// # Errors
///
/// * `400 Bad Request` - If the name is missing or empty
/// * `404 Not Found` - If a user in `shared_with` does not exist
pub async fn create_list(
    AuthUser(user): AuthUser,
    State(lists): State<ListService>,
    JsonBody(request): JsonBody<CreateListRequest>,
) -> Result<(StatusCode, Json<List>), BackendError> {
    let list = lists.create(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

/// Partial update of name, completion flag and entries
///
/// # Errors
///
/// * `403 Forbidden` - If the body carries `shared_with` or `admin`
pub async fn modify_list(
    AuthUser(user): AuthUser,
    State(lists): State<ListService>,
    EntityId(id): EntityId,
    JsonBody(request): JsonBody<ModifyListRequest>,
) -> Result<Json<List>, BackendError> {
    Ok(Json(lists.modify(user.user_id, id, request).await?))
}

pub async fn add_list_users(
    AuthUser(user): AuthUser,
    State(lists): State<ListService>,
    EntityId(id): EntityId,
    JsonBody(request): JsonBody<AddMembersRequest>,
) -> Result<Json<List>, BackendError> {
    Ok(Json(lists.add_members(user.user_id, id, &request.users).await?))
}

/// Take one user off the list
///
/// Reports `"list deleted successfully"` when the last participant left
/// and the list went with them.
pub async fn remove_list_user(
    AuthUser(user): AuthUser,
    State(lists): State<ListService>,
    EntityId(id): EntityId,
    JsonBody(request): JsonBody<RemoveMemberRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    let removed = lists.remove_member(user.user_id, id, request.user).await?;
    let message = match removed.removal {
        Removal::Dissolve => "list deleted successfully".to_string(),
        _ => format!("{} was removed from the list", removed.user.name),
    };
    Ok(Json(MessageResponse::new(message)))
}

pub async fn add_list_items(
    AuthUser(user): AuthUser,
    State(lists): State<ListService>,
    EntityId(id): EntityId,
    JsonBody(request): JsonBody<AddItemsRequest>,
) -> Result<Json<List>, BackendError> {
    Ok(Json(lists.add_items(user.user_id, id, request).await?))
}

pub async fn remove_list_items(
    AuthUser(user): AuthUser,
    State(lists): State<ListService>,
    EntityId(id): EntityId,
    JsonBody(request): JsonBody<RemoveItemsRequest>,
) -> Result<Json<List>, BackendError> {
    Ok(Json(lists.remove_items(user.user_id, id, request).await?))
}

pub async fn delete_list(
    AuthUser(user): AuthUser,
    State(lists): State<ListService>,
    EntityId(id): EntityId,
) -> Result<Json<MessageResponse>, BackendError> {
    lists.delete(user.user_id, id).await?;
    Ok(Json(MessageResponse::new("List deleted successfully")))
}
