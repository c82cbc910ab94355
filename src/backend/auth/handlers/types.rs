/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by the `/users`
 * handlers: signup, login and the password-reset flow.
 */

use serde::{Deserialize, Serialize};

use crate::shared::model::UserProfile;

/// Sign up request
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    /// User's email address (normalized to lower case)
    pub email: String,
    /// User's password (will be hashed before storage)
    pub password: String,
    /// Display name
    pub name: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    /// User's password (will be verified against stored hash)
    pub password: String,
}

/// Auth response
///
/// Returned by signup and login handlers. Contains the JWT token
/// and user information for immediate authentication.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// JWT token for authentication (7-day expiration)
    pub token: String,
    /// User information (without sensitive data)
    pub user: UserProfile,
}

/// Body of `POST /users/password-reset-email`
#[derive(Deserialize, Serialize, Debug)]
pub struct PasswordResetEmailRequest {
    pub email: String,
}

/// Body of `PUT /users/password-reset/{token}/{id}/password-form`
#[derive(Deserialize, Serialize, Debug)]
pub struct PasswordFormRequest {
    /// The new password
    pub password: String,
}
