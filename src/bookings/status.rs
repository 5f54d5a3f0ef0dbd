use axum::{debug_handler, extract::{Path, Query, State}, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::appresult::{AppError, AppResult};
use crate::auth::AuthUser;
use crate::models::BookingStatus;
use crate::store::{BookingStore, PropertyStore};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct StatusQuery {
    status: BookingStatus,
}

#[debug_handler(state = AppState)]
pub(crate) async fn update_status(
    State(bookings): State<BookingStore>,
    State(properties): State<PropertyStore>,
    AuthUser(user): AuthUser,
    Path(booking_id): Path<String>,
    Query(StatusQuery { status }): Query<StatusQuery>,
) -> AppResult<Json<Value>> {
    let booking = bookings
        .find_by_id(&booking_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_owned()))?;
    let property = properties
        .find_by_id(&booking.property_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Property not found".to_owned()))?;

    // only the property's host or the booking's guest may move a booking
    if user.id != property.host_id && user.id != booking.guest_id {
        return Err(AppError::Forbidden(
            "You don't have permission to update this booking".to_owned(),
        ));
    }

    if !booking.status.can_transition(status) {
        return Err(AppError::Conflict(format!(
            "Cannot change booking status from {} to {}",
            booking.status, status
        )));
    }

    bookings.set_status(&booking.id, status).await?;

    Ok(Json(json!({
        "message": "Booking status updated successfully",
        "booking_id": booking.id,
        "status": status,
    })))
}
