/**
 * Password Reset Handlers
 *
 * The three steps of the reset flow:
 *
 * 1. `POST /users/password-reset-email` mails a one-hour link
 *    `<reset_link_base>/password-reset/<token>/<id>`
 * 2. `GET /users/password-reset/{token}/{id}` confirms the link is usable
 * 3. `PUT /users/password-reset/{token}/{id}/password-form` stores the new
 *    password
 *
 * A link is usable when `id` names an existing user and the token verifies
 * and was issued for that same id and email.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use bcrypt::hash;
use std::sync::Arc;

use crate::backend::auth::handlers::types::{PasswordFormRequest, PasswordResetEmailRequest};
use crate::backend::auth::mailer::{Mailer, OutgoingEmail};
use crate::backend::auth::sessions::{SessionKeys, TokenPurpose};
use crate::backend::auth::validation::validate_password;
use crate::backend::error::BackendError;
use crate::backend::middleware::{parse_id, JsonBody};
use crate::backend::store::Store;
use crate::shared::config::AppConfig;
use crate::shared::model::{MessageResponse, User};

const INVALID_LINK: &str = "Invalid or expired reset link";

/// Send a password-reset link
///
/// # Errors
///
/// * `404 Not Found` - If no user has this email
/// * `500 Internal Server Error` - If the token cannot be created or the email cannot be sent
pub async fn password_reset_email(
    State(store): State<Arc<dyn Store>>,
    State(keys): State<SessionKeys>,
    State(config): State<Arc<AppConfig>>,
    State(mailer): State<Arc<dyn Mailer>>,
    JsonBody(request): JsonBody<PasswordResetEmailRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    let email = request.email.trim().to_lowercase();
    let user = store.find_user_by_email(&email).await?.ok_or_else(|| {
        tracing::warn!("Password reset requested for unknown email: {}", email);
        BackendError::not_found("User not found")
    })?;

    let token = keys.issue(user.id, &user.email, TokenPurpose::PasswordReset).map_err(|e| {
        tracing::error!("Failed to create reset token: {:?}", e);
        BackendError::internal("Server error")
    })?;
    let link = format!("{}/password-reset/{}/{}", config.reset_link_base, token, user.id);

    mailer
        .send(OutgoingEmail {
            to: user.email.clone(),
            subject: "Password reset link".to_string(),
            body: format!(
                "Hi {},\n\nUse the link below to choose a new password. It expires in one hour.\n\n{}\n",
                user.name, link
            ),
        })
        .await
        .map_err(|e| {
            tracing::error!("Failed to send reset email to {}: {}", user.email, e);
            e
        })?;

    tracing::info!("Password reset link sent to {}", user.email);
    Ok(Json(MessageResponse::new(format!("Password reset link sent to {}", user.email))))
}

/// Check a reset link before showing the form
///
/// # Errors
///
/// * `404 Not Found` - If `id` does not name a user
/// * `401 Unauthorized` - If the token is invalid, expired or issued for someone else
pub async fn password_reset_page(
    State(store): State<Arc<dyn Store>>,
    State(keys): State<SessionKeys>,
    Path((token, id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, BackendError> {
    let user = resolve_reset_link(store.as_ref(), &keys, &token, &id).await?;
    tracing::debug!("Reset link verified for {}", user.email);
    Ok(Json(MessageResponse::new("Reset link is valid")))
}

/// Store a new password through a reset link
///
/// # Errors
///
/// * `404 Not Found` - If `id` does not name a user
/// * `401 Unauthorized` - If the token is invalid, expired or issued for someone else
/// * `400 Bad Request` - If the new password fails the policy
pub async fn password_reset_form(
    State(store): State<Arc<dyn Store>>,
    State(keys): State<SessionKeys>,
    State(config): State<Arc<AppConfig>>,
    Path((token, id)): Path<(String, String)>,
    JsonBody(request): JsonBody<PasswordFormRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    let user = resolve_reset_link(store.as_ref(), &keys, &token, &id).await?;
    validate_password(&request.password)?;

    let password_hash = hash(&request.password, config.bcrypt_cost).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        BackendError::internal("Server error")
    })?;

    if !store.set_password(user.id, password_hash).await? {
        return Err(BackendError::not_found("User not found"));
    }

    tracing::info!("Password reset for {}", user.email);
    Ok(Json(MessageResponse::new("Password updated successfully")))
}

async fn resolve_reset_link(
    store: &dyn Store,
    keys: &SessionKeys,
    token: &str,
    id: &str,
) -> Result<User, BackendError> {
    let id = parse_id(id)?;
    let user = store
        .find_user(id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    let claims = keys.verify(token, TokenPurpose::PasswordReset).map_err(|e| {
        tracing::warn!("Rejected reset token for {}: {}", id, e);
        BackendError::unauthorized(INVALID_LINK)
    })?;

    let bound_to_user = claims.user_id().map(|sub| sub == user.id).unwrap_or(false);
    if !bound_to_user || claims.email != user.email {
        tracing::warn!("Reset token for {} presented with id {}", claims.sub, id);
        return Err(BackendError::unauthorized(INVALID_LINK));
    }
    Ok(user)
}
