//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers mounted under `/users`.
//! Handlers are organized into focused submodules for maintainability.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs            - Module exports and documentation
//! ├── types.rs          - Request and response types
//! ├── signup.rs         - User registration handler
//! ├── login.rs          - User authentication handler
//! ├── password_reset.rs - Reset email, link check and new password
//! └── users.rs          - User profile queries
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /users/signup - User registration
//! - **`login`** - POST /users/login - User authentication
//! - **`password_reset_email`** - POST /users/password-reset-email
//! - **`password_reset_page`** - GET /users/password-reset/{token}/{id}
//! - **`password_reset_form`** - PUT /users/password-reset/{token}/{id}/password-form
//! - **`get_users`** - GET /users (authenticated)
//! - **`get_user`** - GET /users/{id_or_email} (authenticated)

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Password reset flow
pub mod password_reset;

/// User profile queries
pub mod users;

pub use types::{AuthResponse, LoginRequest, PasswordFormRequest, PasswordResetEmailRequest, SignupRequest};

pub use signup::signup;
pub use login::login;
pub use password_reset::{password_reset_email, password_reset_form, password_reset_page};
pub use users::{get_user, get_users};
