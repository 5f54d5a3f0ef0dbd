use anyhow::anyhow;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::appresult::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies bearer tokens: a base64url claims segment, a dot, and
/// a base64url HMAC-SHA256 tag over that segment. Verification is stateless.
/// There is no revocation list; a token stays valid until its exp passes.
#[derive(Clone)]
pub struct TokenKeys {
    secret: Vec<u8>,
    ttl_minutes: i64,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            ttl_minutes,
        }
    }

    pub fn issue(&self, user_id: &str) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_owned(),
            iat: now,
            exp: now + self.ttl_minutes * 60,
        };

        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        let mut mac = self.mac()?;
        mac.update(body.as_bytes());
        let tag = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{body}.{tag}"))
    }

    /// Returns the subject user id. Tampered, malformed, and expired tokens
    /// all come back as Unauthenticated.
    pub fn verify(&self, token: &str) -> AppResult<String> {
        let (body, tag) = token.split_once('.').ok_or_else(invalid_credentials)?;
        let tag = URL_SAFE_NO_PAD
            .decode(tag)
            .map_err(|_| invalid_credentials())?;

        let mut mac = self.mac()?;
        mac.update(body.as_bytes());
        // constant-time tag comparison
        mac.verify_slice(&tag).map_err(|_| invalid_credentials())?;

        let body = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|_| invalid_credentials())?;
        let claims: Claims =
            serde_json::from_slice(&body).map_err(|_| invalid_credentials())?;

        if claims.exp < Utc::now().timestamp() {
            return Err(AppError::Unauthenticated("Token has expired".to_owned()));
        }

        Ok(claims.sub)
    }

    fn mac(&self) -> AppResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|err| AppError::Internal(anyhow!("hmac key rejected: {err}")))
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthenticated("Could not validate credentials".to_owned())
}
