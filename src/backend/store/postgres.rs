/**
 * Postgres Store
 *
 * `Store` implementation on sqlx/Postgres. Id sets (`shared_with`, a user's
 * `lists` and `groups`) are `UUID[]` columns updated with `array_append` /
 * `array_remove`; a list's entries live in a `JSONB` column. Schema lives in
 * `migrations/` and is applied by [`PgStore::migrate`].
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::sharing::membership::Membership;
use crate::backend::store::{Collection, Store, StoreError, StoreResult};
use crate::shared::model::{Group, GroupUpdate, Item, ItemUpdate, List, ListItem, ListUpdate, User};

const USER_COLUMNS: &str = "id, email, name, password_hash, lists, groups, created_at";
const LIST_COLUMNS: &str = "id, name, created_at, is_completed, admin, shared_with, items";
const GROUP_COLUMNS: &str = "id, name, created_at, admin, shared_with";
const ITEM_COLUMNS: &str = "id, name, checked, created_at";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    lists: Vec<Uuid>,
    groups: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            password_hash: row.password_hash,
            lists: row.lists,
            groups: row.groups,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ListRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    is_completed: bool,
    admin: Uuid,
    shared_with: Vec<Uuid>,
    items: Json<Vec<ListItem>>,
}

impl From<ListRow> for List {
    fn from(row: ListRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            is_completed: row.is_completed,
            admin: row.admin,
            shared_with: row.shared_with,
            items: row.items.0,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GroupRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    admin: Uuid,
    shared_with: Vec<Uuid>,
}

impl From<GroupRow> for Group {
    fn from(row: GroupRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            admin: row.admin,
            shared_with: row.shared_with,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: Uuid,
    name: String,
    checked: bool,
    created_at: DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            checked: row.checked,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MembershipRow {
    admin: Uuid,
    shared_with: Vec<Uuid>,
}

fn table(collection: Collection) -> &'static str {
    match collection {
        Collection::Lists => "lists",
        Collection::Groups => "groups",
    }
}

/// The back-reference column on `users`
fn back_reference_column(collection: Collection) -> &'static str {
    match collection {
        Collection::Lists => "lists",
        Collection::Groups => "groups",
    }
}

/// Store backed by a Postgres connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url`
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Apply the migrations under `migrations/`
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, email, name, password_hash, lists, groups, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(&user.lists)
        .bind(&user.groups)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Duplicate("User with that email already exists".to_string())
            }
            _ => StoreError::Database(e),
        })?;

        Ok(row.into())
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn find_users(&self, ids: &[Uuid]) -> StoreResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1) ORDER BY created_at"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn all_users(&self) -> StoreResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn set_password(&self, id: Uuid, password_hash: String) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn push_back_reference(&self, collection: Collection, users: &[Uuid], id: Uuid) -> StoreResult<u64> {
        let column = back_reference_column(collection);
        let result = sqlx::query(&format!(
            "UPDATE users SET {column} = array_append({column}, $1) WHERE id = ANY($2) AND NOT ($1 = ANY({column}))"
        ))
        .bind(id)
        .bind(users)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn pull_back_reference(&self, collection: Collection, user: Uuid, id: Uuid) -> StoreResult<bool> {
        let column = back_reference_column(collection);
        let result = sqlx::query(&format!("UPDATE users SET {column} = array_remove({column}, $1) WHERE id = $2"))
            .bind(id)
            .bind(user)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn pull_back_references(&self, collection: Collection, id: Uuid) -> StoreResult<u64> {
        let column = back_reference_column(collection);
        let result = sqlx::query(&format!(
            "UPDATE users SET {column} = array_remove({column}, $1) WHERE $1 = ANY({column})"
        ))
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn clear_back_references(&self, collection: Collection) -> StoreResult<u64> {
        let column = back_reference_column(collection);
        let result = sqlx::query(&format!(
            "UPDATE users SET {column} = '{{}}' WHERE cardinality({column}) > 0"
        ))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn find_membership(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Membership>> {
        let row = sqlx::query_as::<_, MembershipRow>(&format!(
            "SELECT admin, shared_with FROM {} WHERE id = $1",
            table(collection)
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|row| Membership::new(row.admin, row.shared_with)))
    }

    async fn push_members(&self, collection: Collection, id: Uuid, members: &[Uuid]) -> StoreResult<bool> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET shared_with = shared_with || $2::uuid[] WHERE id = $1",
            table(collection)
        ))
        .bind(id)
        .bind(members)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn pull_member(&self, collection: Collection, id: Uuid, member: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET shared_with = array_remove(shared_with, $2) WHERE id = $1",
            table(collection)
        ))
        .bind(id)
        .bind(member)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn transfer_admin(&self, collection: Collection, id: Uuid, new_admin: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET admin = $2, shared_with = array_remove(shared_with, $2) WHERE id = $1",
            table(collection)
        ))
        .bind(id)
        .bind(new_admin)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_shared(&self, collection: Collection, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table(collection)))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_list(&self, list: List) -> StoreResult<List> {
        let row = sqlx::query_as::<_, ListRow>(&format!(
            r#"
            INSERT INTO lists (id, name, created_at, is_completed, admin, shared_with, items)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {LIST_COLUMNS}
            "#
        ))
        .bind(list.id)
        .bind(&list.name)
        .bind(list.created_at)
        .bind(list.is_completed)
        .bind(list.admin)
        .bind(&list.shared_with)
        .bind(Json(&list.items))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn find_list(&self, id: Uuid) -> StoreResult<Option<List>> {
        let row = sqlx::query_as::<_, ListRow>(&format!("SELECT {LIST_COLUMNS} FROM lists WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(List::from))
    }

    async fn lists_visible_to(&self, user: Uuid) -> StoreResult<Vec<List>> {
        let rows = sqlx::query_as::<_, ListRow>(&format!(
            "SELECT {LIST_COLUMNS} FROM lists WHERE admin = $1 OR $1 = ANY(shared_with) ORDER BY created_at"
        ))
        .bind(user)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(List::from).collect())
    }

    async fn update_list(&self, id: Uuid, update: ListUpdate) -> StoreResult<Option<List>> {
        let row = sqlx::query_as::<_, ListRow>(&format!(
            r#"
            UPDATE lists
            SET name = COALESCE($2, name),
                is_completed = COALESCE($3, is_completed),
                items = COALESCE($4, items)
            WHERE id = $1
            RETURNING {LIST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.name)
        .bind(update.is_completed)
        .bind(update.items.map(Json))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(List::from))
    }

    async fn pull_list_items(&self, id: Uuid, item_ids: &[Uuid]) -> StoreResult<Option<List>> {
        let row = sqlx::query_as::<_, ListRow>(&format!(
            r#"
            UPDATE lists
            SET items = COALESCE(
                (SELECT jsonb_agg(entry) FROM jsonb_array_elements(items) AS entry
                 WHERE NOT ((entry->>'id')::uuid = ANY($2))),
                '[]'::jsonb)
            WHERE id = $1
            RETURNING {LIST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(item_ids)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(List::from))
    }

    async fn pull_item_from_lists(&self, item: Uuid) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE lists
            SET items = COALESCE(
                (SELECT jsonb_agg(entry) FROM jsonb_array_elements(items) AS entry
                 WHERE entry->>'id' <> $1),
                '[]'::jsonb)
            WHERE items @> jsonb_build_array(jsonb_build_object('id', $1))
            "#,
        )
        .bind(item.to_string())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn insert_group(&self, group: Group) -> StoreResult<Group> {
        let row = sqlx::query_as::<_, GroupRow>(&format!(
            r#"
            INSERT INTO groups (id, name, created_at, admin, shared_with)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(group.id)
        .bind(&group.name)
        .bind(group.created_at)
        .bind(group.admin)
        .bind(&group.shared_with)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn find_group(&self, id: Uuid) -> StoreResult<Option<Group>> {
        let row = sqlx::query_as::<_, GroupRow>(&format!("SELECT {GROUP_COLUMNS} FROM groups WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Group::from))
    }

    async fn groups_visible_to(&self, user: Uuid) -> StoreResult<Vec<Group>> {
        let rows = sqlx::query_as::<_, GroupRow>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE admin = $1 OR $1 = ANY(shared_with) ORDER BY created_at"
        ))
        .bind(user)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Group::from).collect())
    }

    async fn update_group(&self, id: Uuid, update: GroupUpdate) -> StoreResult<Option<Group>> {
        let row = sqlx::query_as::<_, GroupRow>(&format!(
            "UPDATE groups SET name = COALESCE($2, name) WHERE id = $1 RETURNING {GROUP_COLUMNS}"
        ))
        .bind(id)
        .bind(update.name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Group::from))
    }

    async fn delete_all_groups(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM groups").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn insert_item(&self, item: Item) -> StoreResult<Item> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "INSERT INTO items (id, name, checked, created_at) VALUES ($1, $2, $3, $4) RETURNING {ITEM_COLUMNS}"
        ))
        .bind(item.id)
        .bind(&item.name)
        .bind(item.checked)
        .bind(item.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn find_item(&self, id: Uuid) -> StoreResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Item::from))
    }

    async fn find_items(&self, ids: &[Uuid]) -> StoreResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = ANY($1) ORDER BY created_at"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn all_items(&self) -> StoreResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!("SELECT {ITEM_COLUMNS} FROM items ORDER BY created_at"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn update_item(&self, id: Uuid, update: ItemUpdate) -> StoreResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            UPDATE items
            SET name = COALESCE($2, name), checked = COALESCE($3, checked)
            WHERE id = $1
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.name)
        .bind(update.checked)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Item::from))
    }

    async fn delete_item(&self, id: Uuid) -> StoreResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!("DELETE FROM items WHERE id = $1 RETURNING {ITEM_COLUMNS}"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Item::from))
    }
}
