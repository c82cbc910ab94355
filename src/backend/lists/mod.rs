//! Lists Module
//!
//! Shared checklists: creation, sharing, entry editing and deletion.
//!
//! # Module Structure
//!
//! ```text
//! lists/
//! ├── mod.rs      - Module exports
//! ├── service.rs  - ListService (business rules)
//! └── handlers.rs - HTTP handlers for /lists
//! ```

pub mod service;
pub mod handlers;

pub use service::ListService;
