//! Groups Module
//!
//! Named sets of users with an admin.
//!
//! # Module Structure
//!
//! ```text
//! groups/
//! ├── mod.rs      - Module exports
//! ├── service.rs  - GroupService (business rules)
//! └── handlers.rs - HTTP handlers for /groups
//! ```

pub mod service;
pub mod handlers;

pub use service::GroupService;
