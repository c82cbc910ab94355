/**
 * Request Extractors
 *
 * Extractors that reject with [`BackendError`] instead of axum's plain-text
 * rejections, so every failure reaches the client in the same JSON shape.
 */

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::backend::error::BackendError;

/// A single `{id}` path segment parsed as a UUID
///
/// A segment that is not a UUID cannot name any stored entity, so it is
/// rejected with 404 rather than 400.
#[derive(Debug, Clone, Copy)]
pub struct EntityId(pub Uuid);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!("Unreadable path parameter: {}", e);
                BackendError::not_found("Resource not found")
            })?;

        parse_id(&raw).map(EntityId)
    }
}

/// Parse an id from a path or token; malformed ids are NotFound
pub fn parse_id(raw: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw).map_err(|_| {
        tracing::debug!("Malformed id: {}", raw);
        BackendError::not_found("Resource not found")
    })
}

/// A JSON request body whose rejections become `InvalidArgument`
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                Err(BackendError::invalid_argument(rejection.body_text()))
            }
        }
    }
}
