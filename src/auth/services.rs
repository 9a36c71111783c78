use anyhow::Context;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::{LoginRequest, RegisterRequest},
        password::{hash_password, verify_password},
        repo::{NewUser, User},
        validate::{self, Check},
    },
    error::{AppError, INVALID_CREDENTIALS},
    state::AppState,
};

const AVATAR_BASE: &str = "https://s.gravatar.com/avatar";
const AVATAR_SIZE: u32 = 200;
const AVATAR_RATING: &str = "x";
const AVATAR_DEFAULT: &str = "robohash";

/// Deterministic avatar URL for an email address.
pub fn avatar_url(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    format!(
        "{AVATAR_BASE}/{digest:x}?s={AVATAR_SIZE}&r={AVATAR_RATING}&d={AVATAR_DEFAULT}"
    )
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate, hash, insert, and sign a token for the new user.
pub async fn register(st: &AppState, payload: RegisterRequest) -> Result<String, AppError> {
    let name = payload.name.trim().to_string();
    let email = normalize_email(&payload.email);

    validate::run(&[
        Check::not_empty("name", &name, "Name is required"),
        Check::email("email", &email, "Please include a valid email"),
        Check::min_len(
            "password",
            &payload.password,
            6,
            "Please include a password with 6 or more characters",
        ),
    ])?;

    let avatar = avatar_url(&email);
    let password_hash = hash_password(payload.password).await?;

    // The store's unique constraint decides duplicates; there is no read-before-write.
    let user = st
        .users
        .create(NewUser {
            name,
            email,
            avatar,
            password_hash,
        })
        .await
        .map_err(|e| {
            warn!(error = %e, "create user failed");
            AppError::from(e)
        })?;

    let token = st.keys.sign(user.id).context("sign token")?;
    info!(user_id = %user.id, "user registered");
    Ok(token)
}

/// Check credentials and sign a token for the matching user.
pub async fn login(st: &AppState, payload: LoginRequest) -> Result<String, AppError> {
    let email = normalize_email(&payload.email);

    validate::run(&[
        Check::email("email", &email, "Please include a valid email"),
        Check::not_empty("password", &payload.password, "Password is required"),
    ])?;

    let Some(user) = st.users.find_by_email(&email).await? else {
        warn!("login unknown email");
        return Err(AppError::Rejected(INVALID_CREDENTIALS));
    };

    let ok = verify_password(payload.password, user.password_hash.clone()).await?;
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::Rejected(INVALID_CREDENTIALS));
    }

    let token = st.keys.sign(user.id).context("sign token")?;
    info!(user_id = %user.id, "user logged in");
    Ok(token)
}

/// Load the record for an identity already verified by [`crate::auth::extractors::AuthUser`].
pub async fn current_user(st: &AppState, user_id: Uuid) -> Result<User, AppError> {
    st.users
        .find_by_id(user_id)
        .await?
        .with_context(|| format!("user {user_id} not found"))
        .map_err(AppError::from)
}
