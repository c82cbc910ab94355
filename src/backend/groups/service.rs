/**
 * Group Service
 *
 * Business rules for groups. Groups follow the same admin/member model as
 * lists but carry no entries and must start with at least one member
 * besides the creator.
 */

use std::sync::Arc;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::sharing::{initial_members, Membership, RemovedMember, SharingEngine};
use crate::backend::store::{Collection, Store};
use crate::shared::model::{required_name, CreateGroupRequest, Group, ModifyGroupRequest};

/// Operations on groups
#[derive(Clone)]
pub struct GroupService {
    store: Arc<dyn Store>,
    sharing: SharingEngine,
}

impl GroupService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            sharing: SharingEngine::new(store.clone()),
            store,
        }
    }

    /// Create a group administered by `owner`
    ///
    /// # Errors
    ///
    /// * `NotFound` - if the owner or a member does not exist
    /// * `InvalidArgument` - if the name is empty or no member other than
    ///   the owner is given
    pub async fn create(&self, owner: Uuid, request: CreateGroupRequest) -> Result<Group, BackendError> {
        let owner = self.sharing.require_user(owner).await?;
        let name = required_name("name", &request.name)?;

        let members = initial_members(owner.id, &request.shared_with);
        if members.is_empty() {
            return Err(BackendError::invalid_argument("A group needs at least one member"));
        }
        self.sharing.resolve_users(&members).await?;

        let group = self.store.insert_group(Group::new(name, owner.id, members)).await?;
        self.sharing
            .link(Collection::Groups, group.id, &Membership::from(&group))
            .await?;

        tracing::info!("Group {} created by {} with {} members", group.id, owner.email, group.shared_with.len());
        Ok(group)
    }

    pub async fn get(&self, actor: Uuid, id: Uuid) -> Result<Group, BackendError> {
        self.store
            .find_group(id)
            .await?
            .filter(|group| Membership::from(group).includes(actor))
            .ok_or_else(|| BackendError::not_found("Group not found"))
    }

    pub async fn visible(&self, actor: Uuid) -> Result<Vec<Group>, BackendError> {
        Ok(self.store.groups_visible_to(actor).await?)
    }

    /// Rename a group; membership fields are refused with `Forbidden`
    pub async fn modify(&self, actor: Uuid, id: Uuid, request: ModifyGroupRequest) -> Result<Group, BackendError> {
        if request.touches_membership() {
            tracing::warn!("Refusing membership change on group {} through modify", id);
            return Err(BackendError::forbidden("Cannot edit users here"));
        }
        let update = request.into_update()?;
        self.get(actor, id).await?;

        self.store
            .update_group(id, update)
            .await?
            .ok_or_else(|| BackendError::not_found("Group not found"))
    }

    pub async fn add_members(&self, actor: Uuid, id: Uuid, users: &[Uuid]) -> Result<Group, BackendError> {
        self.sharing.add_members(Collection::Groups, actor, id, users).await?;
        self.get(actor, id).await
    }

    pub async fn remove_member(&self, actor: Uuid, id: Uuid, member: Uuid) -> Result<RemovedMember, BackendError> {
        self.sharing.remove_member(Collection::Groups, actor, id, member).await
    }

    pub async fn delete(&self, actor: Uuid, id: Uuid) -> Result<(), BackendError> {
        self.sharing.delete(Collection::Groups, actor, id).await
    }

    /// Delete every group and clear every user's `groups`
    ///
    /// An administrative reset; it is not scoped to the caller.
    pub async fn delete_all(&self) -> Result<u64, BackendError> {
        let deleted = self.store.delete_all_groups().await?;
        let cleared = self.store.clear_back_references(Collection::Groups).await?;
        tracing::warn!("Deleted all {} groups and cleared {} users", deleted, cleared);
        Ok(deleted)
    }
}
