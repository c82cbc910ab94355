/**
 * In-Memory Store
 *
 * A `Store` kept in process memory. It is what the server falls back to
 * when `DATABASE_URL` is not set, and what the tests run against.
 *
 * Each collection is a `Vec` in insertion order, so "all"/"visible" queries
 * come back oldest first like the Postgres store's `ORDER BY created_at`.
 * Every trait method takes the lock once; there is no locking across
 * methods, matching the database store.
 */

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::sharing::membership::Membership;
use crate::backend::store::{Collection, Store, StoreError, StoreResult};
use crate::shared::model::{Group, GroupUpdate, Item, ItemUpdate, List, ListUpdate, User};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    lists: Vec<List>,
    groups: Vec<Group>,
    items: Vec<Item>,
}

impl Collections {
    fn back_references(user: &mut User, collection: Collection) -> &mut Vec<Uuid> {
        match collection {
            Collection::Lists => &mut user.lists,
            Collection::Groups => &mut user.groups,
        }
    }

    /// Mutable `(admin, shared_with)` of a list or group
    fn membership_mut(&mut self, collection: Collection, id: Uuid) -> Option<(&mut Uuid, &mut Vec<Uuid>)> {
        match collection {
            Collection::Lists => self
                .lists
                .iter_mut()
                .find(|list| list.id == id)
                .map(|list| (&mut list.admin, &mut list.shared_with)),
            Collection::Groups => self
                .groups
                .iter_mut()
                .find(|group| group.id == id)
                .map(|group| (&mut group.admin, &mut group.shared_with)),
        }
    }
}

/// Store backed by process memory
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let mut db = self.inner.write().await;
        if db.users.iter().any(|existing| existing.email == user.email) {
            return Err(StoreError::Duplicate("User with that email already exists".to_string()));
        }
        db.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let db = self.inner.read().await;
        Ok(db.users.iter().find(|user| user.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let db = self.inner.read().await;
        Ok(db.users.iter().find(|user| user.email == email).cloned())
    }

    async fn find_users(&self, ids: &[Uuid]) -> StoreResult<Vec<User>> {
        let db = self.inner.read().await;
        Ok(db.users.iter().filter(|user| ids.contains(&user.id)).cloned().collect())
    }

    async fn all_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn set_password(&self, id: Uuid, password_hash: String) -> StoreResult<bool> {
        let mut db = self.inner.write().await;
        match db.users.iter_mut().find(|user| user.id == id) {
            Some(user) => {
                user.password_hash = password_hash;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn push_back_reference(&self, collection: Collection, users: &[Uuid], id: Uuid) -> StoreResult<u64> {
        let mut db = self.inner.write().await;
        let mut changed = 0;
        for user in db.users.iter_mut().filter(|user| users.contains(&user.id)) {
            let refs = Collections::back_references(user, collection);
            if !refs.contains(&id) {
                refs.push(id);
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn pull_back_reference(&self, collection: Collection, user: Uuid, id: Uuid) -> StoreResult<bool> {
        let mut db = self.inner.write().await;
        match db.users.iter_mut().find(|candidate| candidate.id == user) {
            Some(user) => {
                Collections::back_references(user, collection).retain(|held| *held != id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn pull_back_references(&self, collection: Collection, id: Uuid) -> StoreResult<u64> {
        let mut db = self.inner.write().await;
        let mut changed = 0;
        for user in db.users.iter_mut() {
            let refs = Collections::back_references(user, collection);
            let before = refs.len();
            refs.retain(|held| *held != id);
            if refs.len() != before {
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn clear_back_references(&self, collection: Collection) -> StoreResult<u64> {
        let mut db = self.inner.write().await;
        let mut changed = 0;
        for user in db.users.iter_mut() {
            let refs = Collections::back_references(user, collection);
            if !refs.is_empty() {
                refs.clear();
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn find_membership(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Membership>> {
        let db = self.inner.read().await;
        Ok(match collection {
            Collection::Lists => db.lists.iter().find(|list| list.id == id).map(Membership::from),
            Collection::Groups => db.groups.iter().find(|group| group.id == id).map(Membership::from),
        })
    }

    async fn push_members(&self, collection: Collection, id: Uuid, members: &[Uuid]) -> StoreResult<bool> {
        let mut db = self.inner.write().await;
        match db.membership_mut(collection, id) {
            Some((_, shared_with)) => {
                shared_with.extend_from_slice(members);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn pull_member(&self, collection: Collection, id: Uuid, member: Uuid) -> StoreResult<bool> {
        let mut db = self.inner.write().await;
        match db.membership_mut(collection, id) {
            Some((_, shared_with)) => {
                shared_with.retain(|held| *held != member);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn transfer_admin(&self, collection: Collection, id: Uuid, new_admin: Uuid) -> StoreResult<bool> {
        let mut db = self.inner.write().await;
        match db.membership_mut(collection, id) {
            Some((admin, shared_with)) => {
                *admin = new_admin;
                shared_with.retain(|held| *held != new_admin);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_shared(&self, collection: Collection, id: Uuid) -> StoreResult<bool> {
        let mut db = self.inner.write().await;
        let removed = match collection {
            Collection::Lists => {
                let before = db.lists.len();
                db.lists.retain(|list| list.id != id);
                db.lists.len() != before
            }
            Collection::Groups => {
                let before = db.groups.len();
                db.groups.retain(|group| group.id != id);
                db.groups.len() != before
            }
        };
        Ok(removed)
    }

    async fn insert_list(&self, list: List) -> StoreResult<List> {
        self.inner.write().await.lists.push(list.clone());
        Ok(list)
    }

    async fn find_list(&self, id: Uuid) -> StoreResult<Option<List>> {
        let db = self.inner.read().await;
        Ok(db.lists.iter().find(|list| list.id == id).cloned())
    }

    async fn lists_visible_to(&self, user: Uuid) -> StoreResult<Vec<List>> {
        let db = self.inner.read().await;
        Ok(db
            .lists
            .iter()
            .filter(|list| list.admin == user || list.shared_with.contains(&user))
            .cloned()
            .collect())
    }

    async fn update_list(&self, id: Uuid, update: ListUpdate) -> StoreResult<Option<List>> {
        let mut db = self.inner.write().await;
        let Some(list) = db.lists.iter_mut().find(|list| list.id == id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            list.name = name;
        }
        if let Some(is_completed) = update.is_completed {
            list.is_completed = is_completed;
        }
        if let Some(items) = update.items {
            list.items = items;
        }
        Ok(Some(list.clone()))
    }

    async fn pull_list_items(&self, id: Uuid, item_ids: &[Uuid]) -> StoreResult<Option<List>> {
        let mut db = self.inner.write().await;
        let Some(list) = db.lists.iter_mut().find(|list| list.id == id) else {
            return Ok(None);
        };
        list.items.retain(|item| !item_ids.contains(&item.id));
        Ok(Some(list.clone()))
    }

    async fn pull_item_from_lists(&self, item: Uuid) -> StoreResult<u64> {
        let mut db = self.inner.write().await;
        let mut changed = 0;
        for list in db.lists.iter_mut().filter(|list| list.has_item(item)) {
            list.items.retain(|entry| entry.id != item);
            changed += 1;
        }
        Ok(changed)
    }

    async fn insert_group(&self, group: Group) -> StoreResult<Group> {
        self.inner.write().await.groups.push(group.clone());
        Ok(group)
    }

    async fn find_group(&self, id: Uuid) -> StoreResult<Option<Group>> {
        let db = self.inner.read().await;
        Ok(db.groups.iter().find(|group| group.id == id).cloned())
    }

    async fn groups_visible_to(&self, user: Uuid) -> StoreResult<Vec<Group>> {
        let db = self.inner.read().await;
        Ok(db
            .groups
            .iter()
            .filter(|group| group.admin == user || group.shared_with.contains(&user))
            .cloned()
            .collect())
    }

    async fn update_group(&self, id: Uuid, update: GroupUpdate) -> StoreResult<Option<Group>> {
        let mut db = self.inner.write().await;
        let Some(group) = db.groups.iter_mut().find(|group| group.id == id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            group.name = name;
        }
        Ok(Some(group.clone()))
    }

    async fn delete_all_groups(&self) -> StoreResult<u64> {
        let mut db = self.inner.write().await;
        let deleted = db.groups.len() as u64;
        db.groups.clear();
        Ok(deleted)
    }

    async fn insert_item(&self, item: Item) -> StoreResult<Item> {
        self.inner.write().await.items.push(item.clone());
        Ok(item)
    }

    async fn find_item(&self, id: Uuid) -> StoreResult<Option<Item>> {
        let db = self.inner.read().await;
        Ok(db.items.iter().find(|item| item.id == id).cloned())
    }

    async fn find_items(&self, ids: &[Uuid]) -> StoreResult<Vec<Item>> {
        let db = self.inner.read().await;
        Ok(db.items.iter().filter(|item| ids.contains(&item.id)).cloned().collect())
    }

    async fn all_items(&self) -> StoreResult<Vec<Item>> {
        Ok(self.inner.read().await.items.clone())
    }

    async fn update_item(&self, id: Uuid, update: ItemUpdate) -> StoreResult<Option<Item>> {
        let mut db = self.inner.write().await;
        let Some(item) = db.items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            item.name = name;
        }
        if let Some(checked) = update.checked {
            item.checked = checked;
        }
        Ok(Some(item.clone()))
    }

    async fn delete_item(&self, id: Uuid) -> StoreResult<Option<Item>> {
        let mut db = self.inner.write().await;
        let position = db.items.iter().position(|item| item.id == id);
        Ok(position.map(|index| db.items.remove(index)))
    }
}
