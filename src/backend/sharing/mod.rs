//! Sharing Module
//!
//! Ownership and sharing rules for lists and groups.
//!
//! # Module Structure
//!
//! ```text
//! sharing/
//! ├── mod.rs        - Module exports and documentation
//! ├── membership.rs - Pure membership decisions (who is in, who takes over)
//! └── engine.rs     - Store-backed membership operations and cascades
//! ```
//!
//! # Invariants
//!
//! - A list or group has exactly one `admin`, who is never in `shared_with`.
//! - A user's `lists`/`groups` contain an id exactly when the user is that
//!   entity's admin or one of its members.
//! - Deleting an entity prunes its id from every user.

pub mod membership;
pub mod engine;

pub use membership::{initial_members, Membership, Removal};
pub use engine::{RemovedMember, SharingEngine};
