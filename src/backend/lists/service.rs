/**
 * List Service
 *
 * Business rules for shared lists. Membership changes are delegated to the
 * [`SharingEngine`]; everything else (renaming, completing, editing the
 * embedded entries) goes straight to the store after a visibility check.
 *
 * Every operation takes the authenticated `actor`. A list the actor is not
 * on behaves exactly like a list that does not exist.
 */

use std::sync::Arc;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::sharing::{initial_members, Membership, RemovedMember, SharingEngine};
use crate::backend::store::{Collection, Store};
use crate::shared::model::{
    required_name, AddItemsRequest, CreateListRequest, List, ListItem, ListUpdate, ModifyListRequest,
    NewListItem, RemoveItemsRequest,
};

/// Operations on lists
#[derive(Clone)]
pub struct ListService {
    store: Arc<dyn Store>,
    sharing: SharingEngine,
}

impl ListService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            sharing: SharingEngine::new(store.clone()),
            store,
        }
    }

    /// Create a list owned by `owner`
    ///
    /// The owner becomes admin and is never stored in `shared_with`, even
    /// when the request names them. The list id is pushed onto the `lists`
    /// of the owner and every member.
    ///
    /// # Errors
    ///
    /// * `NotFound` - if the owner or any requested member does not exist
    /// * `InvalidArgument` - if the name is empty
    pub async fn create(&self, owner: Uuid, request: CreateListRequest) -> Result<List, BackendError> {
        let owner = self.sharing.require_user(owner).await?;
        let name = required_name("name", &request.name)?;

        let members = initial_members(owner.id, &request.shared_with);
        self.sharing.resolve_users(&members).await?;

        let list = self.store.insert_list(List::new(name, owner.id, members)).await?;
        self.sharing
            .link(Collection::Lists, list.id, &Membership::from(&list))
            .await?;

        tracing::info!(
            "List {} created by {} and shared with {} users",
            list.id,
            owner.email,
            list.shared_with.len()
        );
        Ok(list)
    }

    /// Fetch one list the actor can see
    pub async fn get(&self, actor: Uuid, id: Uuid) -> Result<List, BackendError> {
        self.store
            .find_list(id)
            .await?
            .filter(|list| Membership::from(list).includes(actor))
            .ok_or_else(|| BackendError::not_found("List not found"))
    }

    /// Every list the actor administers or shares
    pub async fn visible(&self, actor: Uuid) -> Result<Vec<List>, BackendError> {
        Ok(self.store.lists_visible_to(actor).await?)
    }

    /// Apply a partial update to name, completion and entries
    ///
    /// # Errors
    ///
    /// * `Forbidden` - if the body carries `shared_with` or `admin`; nothing
    ///   is written in that case
    /// * `InvalidArgument` - if a name is empty
    /// * `NotFound` - if the list is not visible to the actor
    pub async fn modify(&self, actor: Uuid, id: Uuid, request: ModifyListRequest) -> Result<List, BackendError> {
        if request.touches_membership() {
            tracing::warn!("Refusing membership change on list {} through modify", id);
            return Err(BackendError::forbidden("Cannot edit users here"));
        }
        let update = request.into_update()?;
        self.get(actor, id).await?;

        self.store
            .update_list(id, update)
            .await?
            .ok_or_else(|| BackendError::not_found("List not found"))
    }

    /// Share the list with more users; returns the list as it is afterwards
    pub async fn add_members(&self, actor: Uuid, id: Uuid, users: &[Uuid]) -> Result<List, BackendError> {
        self.sharing.add_members(Collection::Lists, actor, id, users).await?;
        self.get(actor, id).await
    }

    /// Take a user off the list, promoting or deleting as needed
    pub async fn remove_member(&self, actor: Uuid, id: Uuid, member: Uuid) -> Result<RemovedMember, BackendError> {
        self.sharing.remove_member(Collection::Lists, actor, id, member).await
    }

    /// Delete the list and prune it from every user
    pub async fn delete(&self, actor: Uuid, id: Uuid) -> Result<(), BackendError> {
        self.sharing.delete(Collection::Lists, actor, id).await
    }

    /// Append entries, skipping ids already on the list
    ///
    /// The list is read, merged and written back in full, so a concurrent
    /// `add_items` on the same list can be lost.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - if no entries are given or an entry name is empty
    /// * `NotFound` - if the list is not visible to the actor
    pub async fn add_items(&self, actor: Uuid, id: Uuid, request: AddItemsRequest) -> Result<List, BackendError> {
        if request.items.is_empty() {
            return Err(BackendError::invalid_argument("No items supplied"));
        }
        let incoming = request
            .items
            .into_iter()
            .map(NewListItem::into_list_item)
            .collect::<Result<Vec<ListItem>, _>>()?;

        let list = self.get(actor, id).await?;
        let mut items = list.items;
        let mut added = 0usize;
        for item in incoming {
            if !items.iter().any(|existing| existing.id == item.id) {
                items.push(item);
                added += 1;
            }
        }

        let update = ListUpdate {
            items: Some(items),
            ..ListUpdate::default()
        };
        let list = self
            .store
            .update_list(id, update)
            .await?
            .ok_or_else(|| BackendError::not_found("List not found"))?;

        tracing::debug!("Added {} entries to list {}", added, id);
        Ok(list)
    }

    /// Pull entries by id in a single write
    ///
    /// # Errors
    ///
    /// * `Forbidden` - if the body carries anything besides `items`
    /// * `NotFound` - if the list is not visible to the actor
    pub async fn remove_items(&self, actor: Uuid, id: Uuid, request: RemoveItemsRequest) -> Result<List, BackendError> {
        if !request.extra.is_empty() {
            tracing::warn!(
                "Refusing removeItem on list {} with extra fields: {:?}",
                id,
                request.extra.keys().collect::<Vec<_>>()
            );
            return Err(BackendError::forbidden("Only items can be removed here"));
        }
        self.get(actor, id).await?;

        self.store
            .pull_list_items(id, &request.items)
            .await?
            .ok_or_else(|| BackendError::not_found("List not found"))
    }
}
