/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /users/login.
 *
 * # Security
 *
 * - Passwords are verified using bcrypt
 * - An unknown email and a wrong password produce the same 401 message
 * - User passwords are never returned in responses
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;
use std::sync::Arc;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::{SessionKeys, TokenPurpose};
use crate::backend::error::BackendError;
use crate::backend::middleware::JsonBody;
use crate::backend::store::Store;
use crate::shared::model::UserProfile;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `500 Internal Server Error` - If the store, bcrypt or token generation fails
pub async fn login(
    State(store): State<Arc<dyn Store>>,
    State(keys): State<SessionKeys>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let email = request.email.trim().to_lowercase();
    tracing::info!("Login request for: {}", email);

    let user = store.find_user_by_email(&email).await?.ok_or_else(|| {
        tracing::warn!("User not found: {}", email);
        BackendError::unauthorized(INVALID_CREDENTIALS)
    })?;

    let valid = verify(&request.password, &user.password_hash).map_err(|e| {
        tracing::error!("Password verification error: {:?}", e);
        BackendError::internal("Server error")
    })?;

    if !valid {
        tracing::warn!("Invalid password for user: {}", email);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = keys.issue(user.id, &user.email, TokenPurpose::Session).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("Server error")
    })?;

    tracing::info!("User logged in successfully: {} ({})", user.name, user.email);

    Ok(Json(AuthResponse {
        token,
        user: UserProfile::from(user),
    }))
}
