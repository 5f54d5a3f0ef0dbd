use std::env;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::Rng;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub token_secret: String,
    pub token_ttl_minutes: i64,
    pub cors_origin: String,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:staynest.db?mode=rwc".to_owned());
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8001".to_owned());
        let token_secret = match env::var("TOKEN_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("TOKEN_SECRET not set, generating one; tokens will not survive a restart");
                let key: [u8; 32] = rand::rng().random();
                URL_SAFE_NO_PAD.encode(key)
            }
        };
        let token_ttl_minutes = env::var("TOKEN_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24 * 60);
        let cors_origin = env::var("CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_owned());

        Self {
            database_url,
            bind_addr,
            token_secret,
            token_ttl_minutes,
            cors_origin,
        }
    }
}
