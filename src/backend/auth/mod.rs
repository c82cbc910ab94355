//! Authentication Module
//!
//! This module handles user registration, login, session tokens and the
//! password-reset flow.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── sessions.rs     - JWT token management
//! ├── validation.rs   - Email and password checks
//! ├── mailer.rs       - Outgoing email (SMTP or log)
//! └── handlers/       - HTTP handlers for /users
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: email, password and name → user created → JWT token returned
//! 2. **Login**: email and password → credentials verified → JWT token returned
//! 3. **Protected routes**: `Authorization: Bearer <token>` → token verified by
//!    the auth middleware → user attached to the request
//! 4. **Password reset**: email → one-hour link mailed → link checked → new
//!    password stored
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - JWT tokens are used for stateless authentication
//! - Session tokens expire after 7 days, reset tokens after 1 hour
//! - Invalid credentials return 401 (no information leakage)

/// JWT token generation and validation
pub mod sessions;

/// Email and password format checks
pub mod validation;

/// Outgoing email
pub mod mailer;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, LoginRequest, SignupRequest};
pub use mailer::{LogMailer, MailError, Mailer, OutgoingEmail, SmtpMailer};
pub use sessions::{Claims, SessionKeys, TokenPurpose, RESET_TTL, SESSION_TTL};
