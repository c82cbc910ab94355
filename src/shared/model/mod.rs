//! Domain Model
//!
//! This module contains the documents the application persists and the
//! request/response contracts built around them:
//!
//! - `User` / `UserProfile` - An account and its sanitized public view
//! - `List` / `ListItem` - A shared checklist and its embedded entries
//! - `Group` - A named set of users with an admin
//! - `Item` - A standalone catalog item lists can reference by id
//!
//! # Usage
//!
//! ```rust
//! use listshare::shared::model::{List, ListItem};
//! use uuid::Uuid;
//!
//! let list = List::new("Groceries".to_string(), Uuid::new_v4(), Vec::new());
//! assert!(list.items.is_empty());
//! ```

pub mod user;
pub mod list;
pub mod group;
pub mod item;
pub mod sharing;

pub use user::{User, UserProfile};
pub use list::{
    AddItemsRequest, CreateListRequest, List, ListItem, ListUpdate, ModifyListRequest, NewListItem,
    RemoveItemsRequest,
};
pub use group::{CreateGroupRequest, DeleteAllResponse, Group, GroupUpdate, ModifyGroupRequest};
pub use item::{CreateItemRequest, Item, ItemUpdate};
pub use sharing::{AddMembersRequest, MessageResponse, RemoveMemberRequest};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::shared::SharedError;

/// Trim a display name and reject it when nothing is left
pub fn required_name(field: &str, value: &str) -> Result<String, SharedError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation(field, format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Deserialize a field that only matters for being sent
///
/// Paired with `#[serde(default)]`: an absent key stays `None`, while any
/// value, `null` included, becomes `Some`.
pub(crate) fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
