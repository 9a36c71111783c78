use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRef, FromRequest, FromRequestParts, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        request::Parts,
        HeaderMap,
    },
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use super::jwt::JwtKeys;
use crate::error::{AppError, ErrorDetail, INVALID_TOKEN, NO_TOKEN};

pub const TOKEN_HEADER: &str = "x-auth-token";

/// Extracts and validates the caller's token, returning the user ID.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts).ok_or(AppError::Unauthorized(NO_TOKEN))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            AppError::Unauthorized(INVALID_TOKEN)
        })?;

        Ok(AuthUser(claims.user.id))
    }
}

/// JSON body that never rejects on shape. A body that is not JSON, or is sent
/// without a JSON content type, becomes `T::default()` so the field checks
/// report every missing field as a 400.
pub struct FormJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = is_json(req.headers());
        let body = Bytes::from_request(req, state).await.map_err(|e| {
            warn!(error = %e, "failed to read request body");
            AppError::Validation(vec![ErrorDetail::message("Invalid request body")])
        })?;

        if !json {
            debug!("body without json content type treated as empty");
            return Ok(FormJson(T::default()));
        }
        let value = serde_json::from_slice(&body).unwrap_or_else(|e| {
            debug!(error = %e, "unparsable json body treated as empty");
            T::default()
        });
        Ok(FormJson(value))
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

// `x-auth-token: <token>` wins over `Authorization: Bearer <token>`.
fn token_from_parts(parts: &Parts) -> Option<&str> {
    if let Some(token) = parts
        .headers
        .get(TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|t| !t.is_empty())
    {
        return Some(token);
    }

    let auth = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
