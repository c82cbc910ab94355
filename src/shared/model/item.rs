//! Item Data Structure
//!
//! Standalone catalog items. A list references one by embedding a
//! [`ListItem`](crate::shared::model::ListItem) with the same id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub checked: bool,
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn new(name: String, checked: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            checked,
            created_at: Utc::now(),
        }
    }
}

/// Body of `POST /items/create`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    #[serde(default)]
    pub checked: bool,
}

/// Body of `PUT /items/modify/{id}`, also the partial update handed to the store
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub checked: Option<bool>,
}
