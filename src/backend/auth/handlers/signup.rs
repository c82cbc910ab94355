/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /users/signup.
 *
 * # Registration Process
 *
 * 1. Validate email format, password policy and name
 * 2. Check if user already exists
 * 3. Hash password using bcrypt
 * 4. Create user in the store
 * 5. Generate JWT token
 * 6. Return token and user profile
 *
 * # Validation
 *
 * - Email must have one '@', a non-empty local part and a dotted domain
 * - Password must be at least 8 characters with a letter and a digit
 * - Name must not be empty
 * - Email must be unique (no existing user with same email)
 */

use axum::{extract::State, response::Json};
use bcrypt::hash;
use std::sync::Arc;

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::sessions::{SessionKeys, TokenPurpose};
use crate::backend::auth::validation::{validate_email, validate_password};
use crate::backend::error::BackendError;
use crate::backend::middleware::JsonBody;
use crate::backend::store::Store;
use crate::shared::config::AppConfig;
use crate::shared::model::{required_name, User, UserProfile};

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - If email, password or name is invalid
/// * `409 Conflict` - If a user with this email already exists
/// * `500 Internal Server Error` - If hashing, storage or token generation fails
///
/// # Example Request
///
/// ```http
/// POST /users/signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "securepassword123",
///   "name": "Jane"
/// }
/// ```
pub async fn signup(
    State(store): State<Arc<dyn Store>>,
    State(keys): State<SessionKeys>,
    State(config): State<Arc<AppConfig>>,
    JsonBody(request): JsonBody<SignupRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("Signup request for email: {}", request.email);

    let email = validate_email(&request.email).map_err(|e| {
        tracing::warn!("Invalid email format: {}", request.email);
        e
    })?;
    validate_password(&request.password)?;
    let name = required_name("name", &request.name)?;

    if store.find_user_by_email(&email).await?.is_some() {
        tracing::warn!("Email already exists: {}", email);
        return Err(BackendError::conflict("Email already registered"));
    }

    let password_hash = hash(&request.password, config.bcrypt_cost).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        BackendError::internal("Server error")
    })?;

    let user = store.insert_user(User::new(email, name, password_hash)).await?;

    let token = keys.issue(user.id, &user.email, TokenPurpose::Session).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("Server error")
    })?;

    tracing::info!("User created successfully: {} ({})", user.name, user.email);

    Ok(Json(AuthResponse {
        token,
        user: UserProfile::from(user),
    }))
}
