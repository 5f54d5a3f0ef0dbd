use axum::{debug_handler, extract::State, Json};
use serde_json::{json, Value};

use crate::appresult::{AppError, AppResult};
use crate::auth::AuthUser;
use crate::bookings::availability::{self, StayRange};
use crate::models::{Booking, BookingCreate};
use crate::store::{BookingStore, PropertyStore};
use crate::AppState;

#[debug_handler(state = AppState)]
pub(crate) async fn create_booking(
    State(properties): State<PropertyStore>,
    State(bookings): State<BookingStore>,
    AuthUser(user): AuthUser,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<Value>> {
    let property = properties
        .find_by_id(&payload.property_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Property not found".to_owned()))?;

    let booking = Booking::new(&property, &user.id, payload)?;
    let range = StayRange::of(&booking);

    // the precheck gives the common-case answer; the conditional insert
    // re-runs it atomically so racing requests cannot both land
    let booked = availability::is_available(&bookings, &property.id, &range).await?
        && bookings.create_if_available(&booking).await?;
    if !booked {
        return Err(AppError::Conflict(
            "Property is not available for the selected dates".to_owned(),
        ));
    }

    tracing::debug!(booking_id = %booking.id, property_id = %property.id, "booking created");

    Ok(Json(json!({
        "message": "Booking created successfully",
        "booking_id": booking.id,
        "status": booking.status,
    })))
}
