use axum::{extract::FromRequestParts, http::request::Parts};

use crate::appresult::{AppError, AppResult};
use crate::models::{User, UserRole};
use crate::AppState;

/// Resolves the bearer credential on the request to a full user record.
/// Handlers that take this extractor are authenticated; role and ownership
/// checks stay with the handler.
#[derive(Debug)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthenticated("Not authenticated".to_owned()))?;

        let user_id = state.tokens.verify(token)?;

        // id decoded from a valid token can still miss if the account is gone
        let user = state
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_owned()))?;

        Ok(AuthUser(user))
    }
}

pub fn require_host(user: &User, detail: &str) -> AppResult<()> {
    if user.user_type != UserRole::Host {
        return Err(AppError::Forbidden(detail.to_owned()));
    }
    Ok(())
}
