use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Lifetime of an issued token when `JWT_TTL_SECONDS` is not set.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 360_000;
/// Upper bound for `JWT_TTL_SECONDS` (ten years).
pub const MAX_TOKEN_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub pages_dir: PathBuf,
    pub listen_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let secret = std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        anyhow::ensure!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let jwt = JwtConfig {
            secret,
            ttl_seconds: parse_ttl(std::env::var("JWT_TTL_SECONDS").ok().as_deref())?,
        };
        let pages_dir = std::env::var("PAGES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("pages"));
        let listen_addr = format!(
            "{}:{}",
            std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
        )
        .parse()
        .context("APP_HOST/APP_PORT do not form a socket address")?;

        Ok(Self {
            database_url,
            jwt,
            pages_dir,
            listen_addr,
        })
    }
}

fn parse_ttl(raw: Option<&str>) -> anyhow::Result<u64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TOKEN_TTL_SECS);
    };
    let ttl: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("JWT_TTL_SECONDS is not a number: {raw:?}"))?;
    anyhow::ensure!(
        (1..=MAX_TOKEN_TTL_SECS).contains(&ttl),
        "JWT_TTL_SECONDS must be between 1 and {MAX_TOKEN_TTL_SECS}, got {ttl}"
    );
    Ok(ttl)
}
