use axum::{debug_handler, extract::State, Json};
use serde_json::{json, Value};

use crate::appresult::{AppError, AppResult};
use crate::auth::AuthUser;
use crate::models::UserUpdate;
use crate::store::UserStore;
use crate::AppState;

#[debug_handler(state = AppState)]
pub(crate) async fn get_profile(AuthUser(user): AuthUser) -> Json<Value> {
    Json(json!({
        "id": user.id,
        "email": user.email,
        "first_name": user.first_name,
        "last_name": user.last_name,
        "phone": user.phone,
        "user_type": user.user_type,
        "profile_image": user.profile_image,
        "is_verified": user.is_verified,
        "created_at": user.created_at,
        "updated_at": user.updated_at,
    }))
}

#[debug_handler(state = AppState)]
pub(crate) async fn update_profile(
    State(users): State<UserStore>,
    AuthUser(user): AuthUser,
    Json(update): Json<UserUpdate>,
) -> AppResult<Json<Value>> {
    let user = users
        .update_profile(&user.id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_owned()))?;

    Ok(Json(json!({
        "message": "Profile updated successfully",
        "user": {
            "id": user.id,
            "email": user.email,
            "first_name": user.first_name,
            "last_name": user.last_name,
            "phone": user.phone,
            "user_type": user.user_type,
            "profile_image": user.profile_image,
        }
    })))
}
