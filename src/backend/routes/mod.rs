//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - Per-resource routers
//! ```
//!
//! # Routes
//!
//! ## Users
//!
//! - `GET /users` - All user profiles (authenticated)
//! - `GET /users/{id_or_email}` - One profile (authenticated)
//! - `POST /users/signup` - User registration
//! - `POST /users/login` - User login
//! - `POST /users/password-reset-email` - Send a reset link
//! - `GET /users/password-reset/{token}/{id}` - Check a reset link
//! - `PUT /users/password-reset/{token}/{id}/password-form` - Set a new password
//!
//! ## Groups (authenticated)
//!
//! - `GET /groups`, `GET /groups/{id}`, `POST /groups`, `PUT /groups/{id}`
//! - `PUT /groups/addUser/{id}`, `PUT /groups/removeUser/{id}`
//! - `DELETE /groups/delete_all`, `DELETE /groups/{id}`
//!
//! ## Lists (authenticated)
//!
//! - `GET /lists`, `GET /lists/{id}`, `POST /lists/create`, `PUT /lists/modify/{id}`
//! - `PUT /lists/addUser/{id}`, `PUT /lists/removeUser/{id}`
//! - `PUT /lists/addItem/{id}`, `DELETE /lists/removeItem/{id}`
//! - `DELETE /lists/delete/{id}`
//!
//! ## Items (authenticated)
//!
//! - `GET /items`, `GET /items/{id}`, `POST /items/create`, `PUT /items/modify/{id}`
//! - `DELETE /items/delete/{id}`, `GET /items/list/{id}`

/// Main router creation
pub mod router;

/// Per-resource routers
pub mod api_routes;

pub use router::create_router;
