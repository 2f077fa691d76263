use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

use super::{jwt::JwtKeys, services::verify_token};
use crate::error::{AppError, INVALID_TOKEN};

/// Extracts and validates the bearer token, returning the user ID.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized("Se requiere token de autenticación"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or(AppError::Unauthorized(INVALID_TOKEN))?;

        let keys = JwtKeys::from_ref(state);
        verify_token(&keys, token.trim()).map(AuthUser)
    }
}
