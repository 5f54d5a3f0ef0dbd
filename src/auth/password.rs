use anyhow::anyhow;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::appresult::{AppError, AppResult};

/// Argon2id hash in PHC string format, fresh salt per call.
pub fn hash(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| AppError::Internal(anyhow!("hash password: {err}")))?;
    Ok(hashed.to_string())
}

/// Constant-time verification against a stored PHC hash.
pub fn verify(password: &str, hashed: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hashed)
        .map_err(|err| AppError::Internal(anyhow!("stored password hash unreadable: {err}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(AppError::Internal(anyhow!("verify password: {err}"))),
    }
}
