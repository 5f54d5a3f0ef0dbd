use axum::{debug_handler, extract::{Path, State}, Json};
use serde_json::{json, Value};

use crate::appresult::{AppError, AppResult};
use crate::store::UserStore;
use crate::AppState;

// public profile; no credential required, only non-sensitive fields
#[debug_handler(state = AppState)]
pub(crate) async fn get_user(
    State(users): State<UserStore>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Value>> {
    let user = users
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_owned()))?;

    Ok(Json(json!({
        "id": user.id,
        "first_name": user.first_name,
        "last_name": user.last_name,
        "user_type": user.user_type,
        "profile_image": user.profile_image,
        "is_verified": user.is_verified,
    })))
}
