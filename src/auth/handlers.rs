use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{LoginRequest, RegisterRequest, TokenResponse},
        extractors::{AuthUser, FormJson},
        repo::User,
        services,
    },
    error::AppError,
    state::AppState,
};

/// `GET /auth` returns the caller, `POST /auth` logs in.
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth", post(login).get(whoami))
}

pub fn users_routes() -> Router<AppState> {
    Router::new().route("/users", post(register))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    FormJson(payload): FormJson<RegisterRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = services::register(&state, payload).await?;
    Ok(Json(TokenResponse { token }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    FormJson(payload): FormJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = services::login(&state, payload).await?;
    Ok(Json(TokenResponse { token }))
}

#[instrument(skip(state))]
pub async fn whoami(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<User>, AppError> {
    let user = services::current_user(&state, user_id).await?;
    Ok(Json(user))
}
