use std::time::Duration;

use anyhow::Context;
use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::{
    auth::claims::{Claims, TokenUser},
    config::JwtConfig,
    state::AppState,
};

/// Signing and verification keys, built once from configuration.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.keys.clone()
    }
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            ttl: Duration::from_secs(cfg.ttl_seconds),
        }
    }

    pub fn sign(&self, user_id: Uuid) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let ttl = TimeDuration::try_from(self.ttl).context("token ttl out of range")?;
        let exp = now
            .checked_add(ttl)
            .context("token expiry overflows the calendar")?;
        let claims = Claims {
            user: TokenUser { id: user_id },
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        debug!(user_id = %data.claims.user.id, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys::from_config(&JwtConfig {
            secret: secret.into(),
            ttl_seconds: crate::config::DEFAULT_TOKEN_TTL_SECS,
        })
    }

    #[test]
    fn sign_and_verify_token() {
        let keys = make_keys("dev-secret");
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id).expect("sign");
        let claims = keys.verify(&token).expect("verify token");
        assert_eq!(claims.user.id, user_id);
        assert_eq!(claims.exp - claims.iat, 360_000);
    }

    #[test]
    fn payload_nests_id_under_user() {
        let claims = Claims {
            user: TokenUser { id: Uuid::nil() },
            iat: 1,
            exp: 2,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["user"]["id"], Uuid::nil().to_string());
    }

    #[test]
    fn verify_rejects_other_secret() {
        let token = make_keys("secret-a").sign(Uuid::new_v4()).expect("sign");
        assert!(make_keys("secret-b").verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_expired_token() {
        let keys = make_keys("dev-secret");
        let past = OffsetDateTime::now_utc() - TimeDuration::hours(2);
        let claims = Claims {
            user: TokenUser { id: Uuid::new_v4() },
            iat: (past - TimeDuration::hours(1)).unix_timestamp() as usize,
            exp: past.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn oversized_ttl_fails_instead_of_wrapping() {
        let keys = JwtKeys::from_config(&JwtConfig {
            secret: "dev-secret".into(),
            ttl_seconds: u64::MAX,
        });
        assert!(keys.sign(Uuid::new_v4()).is_err());

        let keys = JwtKeys::from_config(&JwtConfig {
            secret: "dev-secret".into(),
            ttl_seconds: i64::MAX as u64,
        });
        assert!(keys.sign(Uuid::new_v4()).is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        assert!(make_keys("dev-secret").verify("not.a.token").is_err());
    }
}
