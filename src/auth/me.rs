use axum::{debug_handler, Json};
use serde_json::{json, Value};

use crate::auth::guard::AuthUser;
use crate::AppState;

#[debug_handler(state = AppState)]
pub(crate) async fn me(AuthUser(user): AuthUser) -> Json<Value> {
    Json(json!({
        "id": user.id,
        "email": user.email,
        "first_name": user.first_name,
        "last_name": user.last_name,
        "user_type": user.user_type,
        "profile_image": user.profile_image,
        "is_verified": user.is_verified,
    }))
}
