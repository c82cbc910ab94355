//! Group Data Structure
//!
//! A named set of users with an admin. Groups carry no items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::shared::model::{present, required_name};
use crate::shared::SharedError;

/// A group of users
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// The single user who controls the group
    pub admin: Uuid,
    /// Members other than the admin
    pub shared_with: Vec<Uuid>,
}

impl Group {
    pub fn new(name: String, admin: Uuid, shared_with: Vec<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
            admin,
            shared_with,
        }
    }
}

/// Body of `POST /groups`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    #[serde(alias = "group_name")]
    pub name: String,
    #[serde(default, alias = "group_members")]
    pub shared_with: Vec<Uuid>,
}

/// Body of `PUT /groups/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifyGroupRequest {
    #[serde(default, alias = "group_name")]
    pub name: Option<String>,
    #[serde(
        default,
        alias = "group_members",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub shared_with: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub admin: Option<Value>,
}

impl ModifyGroupRequest {
    pub fn touches_membership(&self) -> bool {
        self.shared_with.is_some() || self.admin.is_some()
    }

    pub fn into_update(self) -> Result<GroupUpdate, SharedError> {
        Ok(GroupUpdate {
            name: self.name.map(|name| required_name("name", &name)).transpose()?,
        })
    }
}

/// Partial update applied by the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupUpdate {
    pub name: Option<String>,
}

/// Response of `DELETE /groups/delete_all`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteAllResponse {
    pub message: String,
    pub deleted: u64,
}
