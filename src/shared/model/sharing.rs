//! Membership request types shared by lists and groups.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `PUT /lists/addUser/{id}` and `PUT /groups/addUser/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMembersRequest {
    pub users: Vec<Uuid>,
}

/// Body of `PUT /lists/removeUser/{id}` and `PUT /groups/removeUser/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveMemberRequest {
    pub user: Uuid,
}

/// Plain confirmation payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
