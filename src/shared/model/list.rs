//! List Data Structure
//!
//! A shared checklist. The list owns its entries: `items` is embedded in the
//! list document and disappears with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::shared::model::{present, required_name, Item};
use crate::shared::SharedError;

/// An entry embedded in a list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListItem {
    /// Entry ID; equal to a catalog [`Item`] id when the entry references one
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub checked: bool,
}

impl From<&Item> for ListItem {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            checked: item.checked,
        }
    }
}

/// A shared list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct List {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub is_completed: bool,
    /// The single user who controls the list
    pub admin: Uuid,
    /// Users granted access, never including the admin
    pub shared_with: Vec<Uuid>,
    pub items: Vec<ListItem>,
}

impl List {
    /// A new, empty, uncompleted list
    pub fn new(name: String, admin: Uuid, shared_with: Vec<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
            is_completed: false,
            admin,
            shared_with,
            items: Vec::new(),
        }
    }

    /// Whether the entry with this id is already on the list
    pub fn has_item(&self, id: Uuid) -> bool {
        self.items.iter().any(|item| item.id == id)
    }
}

/// An entry as submitted by a client; the id is generated when omitted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewListItem {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub checked: bool,
}

impl NewListItem {
    /// Validate the name and settle the id
    pub fn into_list_item(self) -> Result<ListItem, SharedError> {
        Ok(ListItem {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name: required_name("item name", &self.name)?,
            checked: self.checked,
        })
    }
}

/// Body of `POST /lists/create`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListRequest {
    pub name: String,
    /// Users to share the list with; the creator becomes admin
    #[serde(default)]
    pub shared_with: Vec<Uuid>,
}

/// Body of `PUT /lists/modify/{id}`
///
/// `shared_with` and `admin` are accepted by the parser only so that an
/// attempt to change them can be refused explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifyListRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    /// Replaces the whole entry collection
    #[serde(default)]
    pub items: Option<Vec<NewListItem>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub shared_with: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub admin: Option<Value>,
}

impl ModifyListRequest {
    /// Whether the request tries to change who is on the list
    pub fn touches_membership(&self) -> bool {
        self.shared_with.is_some() || self.admin.is_some()
    }

    /// Validated partial update
    ///
    /// A replacement entry collection keeps the first entry for each id.
    pub fn into_update(self) -> Result<ListUpdate, SharedError> {
        let name = self.name.map(|name| required_name("name", &name)).transpose()?;
        let items = self
            .items
            .map(|items| {
                let mut entries: Vec<ListItem> = Vec::with_capacity(items.len());
                for item in items {
                    let item = item.into_list_item()?;
                    if !entries.iter().any(|entry| entry.id == item.id) {
                        entries.push(item);
                    }
                }
                Ok::<_, SharedError>(entries)
            })
            .transpose()?;

        Ok(ListUpdate {
            name,
            is_completed: self.is_completed,
            items,
        })
    }
}

/// Partial update applied by the store; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUpdate {
    pub name: Option<String>,
    pub is_completed: Option<bool>,
    pub items: Option<Vec<ListItem>>,
}

/// Body of `PUT /lists/addItem/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddItemsRequest {
    pub items: Vec<NewListItem>,
}

/// Body of `DELETE /lists/removeItem/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveItemsRequest {
    /// Ids of the entries to pull
    pub items: Vec<Uuid>,
    /// Anything else the client sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
