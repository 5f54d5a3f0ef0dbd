pub mod availability;

mod create;
mod list;
mod status;

pub(crate) use create::create_booking;
pub(crate) use list::{host_bookings, my_bookings};
pub(crate) use status::update_status;

use axum::{routing::{get, post, put}, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking))
        .route("/my-bookings", get(my_bookings))
        .route("/host/bookings", get(host_bookings))
        .route("/{booking_id}/status", put(update_status))
}
