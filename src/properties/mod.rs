mod create;
mod list;
mod mine;

pub(crate) use create::create_property;
pub(crate) use list::{get_property, list_properties};
pub(crate) use mine::my_properties;

use axum::{routing::get, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_properties).post(create_property))
        .route("/host/my-properties", get(my_properties))
        .route("/{property_id}", get(get_property))
}
