use axum::{debug_handler, extract::State, Json};
use serde_json::{json, Value};

use crate::appresult::AppResult;
use crate::auth::{password, token::TokenKeys};
use crate::models::{User, UserCreate};
use crate::store::UserStore;
use crate::AppState;

#[debug_handler(state = AppState)]
pub(crate) async fn register(
    State(users): State<UserStore>,
    State(tokens): State<TokenKeys>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<Value>> {
    let password_hash = password::hash(&payload.password)?;
    let user = User::new(payload, password_hash);

    // the unique email index turns a duplicate into Conflict here
    users.insert(&user).await?;
    let access_token = tokens.issue(&user.id)?;

    tracing::info!(user_id = %user.id, "registered {}", user.email);

    Ok(Json(json!({
        "message": "User registered successfully",
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
