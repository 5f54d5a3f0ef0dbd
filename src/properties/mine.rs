use axum::{debug_handler, extract::State, Json};
use serde_json::{json, Value};

use crate::appresult::AppResult;
use crate::auth::{require_host, AuthUser};
use crate::store::PropertyStore;
use crate::AppState;

#[debug_handler(state = AppState)]
pub(crate) async fn my_properties(
    State(properties): State<PropertyStore>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Value>> {
    require_host(&user, "Only hosts can access this endpoint")?;

    let items = properties.list_for_host(&user.id).await?;
    let total = items.len();

    Ok(Json(json!({
        "properties": items,
        "total": total,
    })))
}
