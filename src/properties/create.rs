use axum::{debug_handler, extract::State, Json};
use serde_json::{json, Value};

use crate::appresult::AppResult;
use crate::auth::{require_host, AuthUser};
use crate::models::{Property, PropertyCreate};
use crate::store::PropertyStore;
use crate::AppState;

#[debug_handler(state = AppState)]
pub(crate) async fn create_property(
    State(properties): State<PropertyStore>,
    AuthUser(user): AuthUser,
    Json(payload): Json<PropertyCreate>,
) -> AppResult<Json<Value>> {
    require_host(&user, "Only hosts can create properties")?;

    let property = Property::new(&user.id, payload)?;
    properties.insert(&property).await?;

    tracing::debug!(property_id = %property.id, host_id = %user.id, "property created");

    Ok(Json(json!({
        "message": "Property created successfully",
        "property_id": property.id,
    })))
}
