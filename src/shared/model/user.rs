//! User Data Structure
//!
//! A registered account and the back-references it keeps to the lists and
//! groups it participates in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user as stored
///
/// `User` is deliberately not `Serialize`: responses go through
/// [`UserProfile`], which has no credential field.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,
    /// Email address, trimmed and lower-cased, unique across users
    pub email: String,
    /// Display name
    pub name: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Lists this user administers or is shared on
    pub lists: Vec<Uuid>,
    /// Groups this user administers or is a member of
    pub groups: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// A freshly signed-up user with no lists or groups
    pub fn new(email: String, name: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password_hash,
            lists: Vec::new(),
            groups: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password_hash", &"<redacted>")
            .field("lists", &self.lists)
            .field("groups", &self.groups)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// User response (without sensitive data)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub lists: Vec<Uuid>,
    pub groups: Vec<Uuid>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            lists: user.lists.clone(),
            groups: user.groups.clone(),
        }
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            lists: user.lists,
            groups: user.groups,
        }
    }
}
