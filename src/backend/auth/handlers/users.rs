/**
 * User Query Handlers
 *
 * `GET /users` and `GET /users/{id_or_email}`. Both sit behind the auth
 * middleware and only ever return [`UserProfile`]s.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use std::sync::Arc;

use crate::backend::error::BackendError;
use crate::backend::middleware::parse_id;
use crate::backend::store::Store;
use crate::shared::model::UserProfile;

pub async fn get_users(State(store): State<Arc<dyn Store>>) -> Result<Json<Vec<UserProfile>>, BackendError> {
    let users = store.all_users().await?;
    Ok(Json(users.iter().map(UserProfile::from).collect()))
}

/// Look a user up by id, or by email when the segment contains `@`
pub async fn get_user(
    State(store): State<Arc<dyn Store>>,
    Path(id_or_email): Path<String>,
) -> Result<Json<UserProfile>, BackendError> {
    let user = if id_or_email.contains('@') {
        store.find_user_by_email(&id_or_email.trim().to_lowercase()).await?
    } else {
        store.find_user(parse_id(&id_or_email)?).await?
    };

    user.map(|user| Json(UserProfile::from(user)))
        .ok_or_else(|| BackendError::not_found("User not found"))
}
