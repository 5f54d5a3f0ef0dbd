use axum::{debug_handler, extract::{Path, Query, State}, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::appresult::{AppError, AppResult};
use crate::models::Property;
use crate::store::{PropertyFilter, PropertyStore};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    skip: i64,
    #[serde(default = "default_limit")]
    limit: i64,
    city: Option<String>,
    property_type: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
}

fn default_limit() -> i64 {
    10
}

#[debug_handler(state = AppState)]
pub(crate) async fn list_properties(
    State(properties): State<PropertyStore>,
    Query(q): Query<ListQuery>,
) -> AppResult<Json<Value>> {
    let filter = PropertyFilter {
        skip: q.skip.max(0),
        limit: q.limit.clamp(1, 100),
        city: q.city,
        property_type: q.property_type,
        min_price: q.min_price,
        max_price: q.max_price,
    };

    let (items, total) = properties.search(&filter).await?;

    Ok(Json(json!({
        "properties": items,
        "total": total,
        "skip": filter.skip,
        "limit": filter.limit,
    })))
}

#[debug_handler(state = AppState)]
pub(crate) async fn get_property(
    State(properties): State<PropertyStore>,
    Path(property_id): Path<String>,
) -> AppResult<Json<Property>> {
    let property = properties
        .find_by_id(&property_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Property not found".to_owned()))?;

    Ok(Json(property))
}
