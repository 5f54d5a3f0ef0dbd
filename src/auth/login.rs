use axum::{debug_handler, extract::State, Json};
use serde_json::{json, Value};

use crate::appresult::{AppError, AppResult};
use crate::auth::{password, token::TokenKeys};
use crate::models::UserLogin;
use crate::store::UserStore;
use crate::AppState;

#[debug_handler(state = AppState)]
pub(crate) async fn login(
    State(users): State<UserStore>,
    State(tokens): State<TokenKeys>,
    Json(UserLogin { email, password }): Json<UserLogin>,
) -> AppResult<Json<Value>> {
    // same response for unknown email and wrong password
    let rejected = || AppError::Unauthenticated("Invalid email or password".to_owned());

    let user = users.find_by_email(&email).await?.ok_or_else(rejected)?;
    if !password::verify(&password, &user.password_hash)? {
        return Err(rejected());
    }

    let access_token = tokens.issue(&user.id)?;

    tracing::info!(user_id = %user.id, "login {}", user.email);

    Ok(Json(json!({
        "message": "Login successful",
        "access_token": access_token,
        "token_type": "bearer",
        "user": {
            "id": user.id,
            "email": user.email,
            "first_name": user.first_name,
            "last_name": user.last_name,
            "user_type": user.user_type,
        }
    })))
}
