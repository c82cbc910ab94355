/**
 * Group Handlers
 *
 * HTTP handlers for the `/groups` routes, all behind the auth middleware.
 */

use axum::{extract::State, http::StatusCode, Json};

use crate::backend::error::BackendError;
use crate::backend::groups::service::GroupService;
use crate::backend::middleware::{AuthUser, EntityId, JsonBody};
use crate::backend::sharing::Removal;
use crate::shared::model::{
    AddMembersRequest, CreateGroupRequest, DeleteAllResponse, Group, MessageResponse, ModifyGroupRequest,
    RemoveMemberRequest,
};

pub async fn get_groups(
    AuthUser(user): AuthUser,
    State(groups): State<GroupService>,
) -> Result<Json<Vec<Group>>, BackendError> {
    Ok(Json(groups.visible(user.user_id).await?))
}

pub async fn get_group(
    AuthUser(user): AuthUser,
    State(groups): State<GroupService>,
    EntityId(id): EntityId,
) -> Result<Json<Group>, BackendError> {
    Ok(Json(groups.get(user.user_id, id).await?))
}

/// Create a group with the caller as admin
///
/// # Errors
///
/// * `400 Bad Request` - If the name is empty or no other member is given
/// * `404 Not Found` - If a member does not exist
pub async fn create_group(
    AuthUser(user): AuthUser,
    State(groups): State<GroupService>,
    JsonBody(request): JsonBody<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), BackendError> {
    let group = groups.create(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

pub async fn modify_group(
    AuthUser(user): AuthUser,
    State(groups): State<GroupService>,
    EntityId(id): EntityId,
    JsonBody(request): JsonBody<ModifyGroupRequest>,
) -> Result<Json<Group>, BackendError> {
    Ok(Json(groups.modify(user.user_id, id, request).await?))
}

pub async fn add_group_users(
    AuthUser(user): AuthUser,
    State(groups): State<GroupService>,
    EntityId(id): EntityId,
    JsonBody(request): JsonBody<AddMembersRequest>,
) -> Result<Json<Group>, BackendError> {
    Ok(Json(groups.add_members(user.user_id, id, &request.users).await?))
}

pub async fn remove_group_user(
    AuthUser(user): AuthUser,
    State(groups): State<GroupService>,
    EntityId(id): EntityId,
    JsonBody(request): JsonBody<RemoveMemberRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    let removed = groups.remove_member(user.user_id, id, request.user).await?;
    let message = match removed.removal {
        Removal::Dissolve => "group deleted successfully".to_string(),
        _ => format!("{} was removed from the group", removed.user.name),
    };
    Ok(Json(MessageResponse::new(message)))
}

pub async fn delete_group(
    AuthUser(user): AuthUser,
    State(groups): State<GroupService>,
    EntityId(id): EntityId,
) -> Result<Json<MessageResponse>, BackendError> {
    groups.delete(user.user_id, id).await?;
    Ok(Json(MessageResponse::new("Group deleted successfully")))
}

/// Delete every group in the system
pub async fn delete_all_groups(
    AuthUser(user): AuthUser,
    State(groups): State<GroupService>,
) -> Result<Json<DeleteAllResponse>, BackendError> {
    tracing::warn!("Delete of all groups requested by {}", user.email);
    let deleted = groups.delete_all().await?;
    Ok(Json(DeleteAllResponse {
        message: "All groups deleted".to_string(),
        deleted,
    }))
}
