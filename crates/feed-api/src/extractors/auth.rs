//! Authentication extractor
//!
//! Resolves the bearer credential in the Authorization header to a user id
//! through the configured identity provider.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use feed_core::EntityId;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from the bearer credential
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: EntityId,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let user_id = app_state
            .service_context()
            .identity()
            .authenticate(bearer.token())?;

        Ok(AuthUser { user_id })
    }
}
