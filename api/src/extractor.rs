use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use kernel::model::id::UserId;
use shared::error::AppError;

/// Caller identity, forwarded by the gateway in the `x-user-id` header.
/// Authentication itself happens upstream; the scheduling core only needs
/// to know who the reservation belongs to.
pub struct RequestUser(UserId);

impl RequestUser {
    pub fn id(&self) -> UserId {
        self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::ValidationError("missing x-user-id header".into()))?;
        let user_id = header
            .parse::<UserId>()
            .map_err(|_| AppError::ValidationError("x-user-id must be a UUID".into()))?;
        Ok(Self(user_id))
    }
}
