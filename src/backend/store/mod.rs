//! Persistence Module
//!
//! The document store behind every handler. The rest of the backend only
//! sees the [`Store`] trait, so the same services run against Postgres in
//! production and against memory in tests or when no database is configured.
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs      - Store trait, Collection, StoreError
//! ├── memory.rs   - In-memory store (Vecs behind a tokio RwLock)
//! └── postgres.rs - sqlx/Postgres store (arrays for id sets, JSONB for items)
//! ```
//!
//! # Semantics
//!
//! Lookups return `Ok(None)` when nothing matches; an `Err` always means the
//! store itself failed. Updates by id return `false`/`None` when the id does
//! not exist. Every method is a single write or read: callers that need
//! several (for example creating a list and then pushing back-references)
//! get no atomicity across them.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::sharing::membership::Membership;
use crate::shared::model::{Group, GroupUpdate, Item, ItemUpdate, List, ListUpdate, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique key is already taken
    #[error("{0}")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The shared collections: documents with an admin, a `shared_with` set and
/// a mirrored back-reference collection on each participating user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Lists,
    Groups,
}

impl Collection {
    /// Singular name used in messages
    pub fn label(&self) -> &'static str {
        match self {
            Collection::Lists => "list",
            Collection::Groups => "group",
        }
    }

    /// Capitalized singular name used at the start of messages
    pub fn title(&self) -> &'static str {
        match self {
            Collection::Lists => "List",
            Collection::Groups => "Group",
        }
    }
}

/// Document store operations
#[async_trait]
pub trait Store: Send + Sync {
    // Users

    /// Insert a new user; `Duplicate` when the email is taken
    async fn insert_user(&self, user: User) -> StoreResult<User>;
    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    /// Users whose id is in `ids`; missing ids are simply absent from the result
    async fn find_users(&self, ids: &[Uuid]) -> StoreResult<Vec<User>>;
    async fn all_users(&self) -> StoreResult<Vec<User>>;
    async fn set_password(&self, id: Uuid, password_hash: String) -> StoreResult<bool>;

    // Back-references (`lists` / `groups` on users)

    /// Append `id` to the back-references of every user in `users` that does
    /// not hold it yet; returns the number of users changed
    async fn push_back_reference(&self, collection: Collection, users: &[Uuid], id: Uuid) -> StoreResult<u64>;
    /// Remove `id` from one user's back-references
    async fn pull_back_reference(&self, collection: Collection, user: Uuid, id: Uuid) -> StoreResult<bool>;
    /// Remove `id` from every user's back-references
    async fn pull_back_references(&self, collection: Collection, id: Uuid) -> StoreResult<u64>;
    /// Empty the back-reference collection of every user
    async fn clear_back_references(&self, collection: Collection) -> StoreResult<u64>;

    // Membership of lists and groups

    async fn find_membership(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Membership>>;
    /// Append to `shared_with` as given; deduplication is the caller's job
    async fn push_members(&self, collection: Collection, id: Uuid, members: &[Uuid]) -> StoreResult<bool>;
    async fn pull_member(&self, collection: Collection, id: Uuid, member: Uuid) -> StoreResult<bool>;
    /// Make `new_admin` the admin and pull it from `shared_with`, in one write
    async fn transfer_admin(&self, collection: Collection, id: Uuid, new_admin: Uuid) -> StoreResult<bool>;
    async fn delete_shared(&self, collection: Collection, id: Uuid) -> StoreResult<bool>;

    // Lists

    async fn insert_list(&self, list: List) -> StoreResult<List>;
    async fn find_list(&self, id: Uuid) -> StoreResult<Option<List>>;
    /// Lists where `user` is admin or in `shared_with`, oldest first
    async fn lists_visible_to(&self, user: Uuid) -> StoreResult<Vec<List>>;
    async fn update_list(&self, id: Uuid, update: ListUpdate) -> StoreResult<Option<List>>;
    /// Pull every entry whose id is in `item_ids`, in one write
    async fn pull_list_items(&self, id: Uuid, item_ids: &[Uuid]) -> StoreResult<Option<List>>;
    /// Pull the entry `item` from every list embedding it
    async fn pull_item_from_lists(&self, item: Uuid) -> StoreResult<u64>;

    // Groups

    async fn insert_group(&self, group: Group) -> StoreResult<Group>;
    async fn find_group(&self, id: Uuid) -> StoreResult<Option<Group>>;
    /// Groups where `user` is admin or in `shared_with`, oldest first
    async fn groups_visible_to(&self, user: Uuid) -> StoreResult<Vec<Group>>;
    async fn update_group(&self, id: Uuid, update: GroupUpdate) -> StoreResult<Option<Group>>;
    async fn delete_all_groups(&self) -> StoreResult<u64>;

    // Items

    async fn insert_item(&self, item: Item) -> StoreResult<Item>;
    async fn find_item(&self, id: Uuid) -> StoreResult<Option<Item>>;
    async fn find_items(&self, ids: &[Uuid]) -> StoreResult<Vec<Item>>;
    async fn all_items(&self) -> StoreResult<Vec<Item>>;
    async fn update_item(&self, id: Uuid, update: ItemUpdate) -> StoreResult<Option<Item>>;
    async fn delete_item(&self, id: Uuid) -> StoreResult<Option<Item>>;
}
