//! Bearer token extraction.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use crate::io::rest::error::ApiError;
use crate::AppState;

/// Caller identity resolved from `Authorization: Bearer <token>`.
///
/// Every protected handler takes this as an argument; requests without a
/// valid token never reach the handler body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub account_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                warn!("{} {} rejected: missing bearer token", parts.method, parts.uri.path());
                ApiError::unauthorized("Missing bearer token")
            })?;

        let claims = state.account_service.authenticate(token).map_err(|e| {
            warn!("{} {} rejected: {}", parts.method, parts.uri.path(), e);
            ApiError::from(e)
        })?;

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            account_id: claims.account_id,
        })
    }
}
