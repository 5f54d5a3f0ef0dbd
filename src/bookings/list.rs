use axum::{debug_handler, extract::State, Json};
use serde_json::{json, Value};

use crate::appresult::AppResult;
use crate::auth::{require_host, AuthUser};
use crate::store::{BookingStore, PropertyStore, UserStore};
use crate::AppState;

/// The guest's bookings, each with a short property summary stitched in at
/// read time.
#[debug_handler(state = AppState)]
pub(crate) async fn my_bookings(
    State(bookings): State<BookingStore>,
    State(properties): State<PropertyStore>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Value>> {
    let rows = bookings.list_for_guest(&user.id).await?;

    let mut items = Vec::with_capacity(rows.len());
    for booking in rows {
        let mut doc = serde_json::to_value(&booking)?;
        if let Some(p) = properties.find_by_id(&booking.property_id).await? {
            doc["property"] = json!({
                "title": p.title,
                "location": p.location,
                "images": p.images.into_iter().take(1).collect::<Vec<_>>(),
            });
        }
        items.push(doc);
    }

    let total = items.len();
    Ok(Json(json!({ "bookings": items, "total": total })))
}

/// Bookings across all of the host's properties, with property and guest
/// summaries.
#[debug_handler(state = AppState)]
pub(crate) async fn host_bookings(
    State(bookings): State<BookingStore>,
    State(properties): State<PropertyStore>,
    State(users): State<UserStore>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Value>> {
    require_host(&user, "Only hosts can access this endpoint")?;

    let rows = bookings.list_for_host(&user.id).await?;

    let mut items = Vec::with_capacity(rows.len());
    for booking in rows {
        let mut doc = serde_json::to_value(&booking)?;
        if let Some(p) = properties.find_by_id(&booking.property_id).await? {
            doc["property"] = json!({
                "title": p.title,
                "location": p.location,
            });
        }
        if let Some(guest) = users.find_by_id(&booking.guest_id).await? {
            doc["guest"] = json!({
                "first_name": guest.first_name,
                "last_name": guest.last_name,
                "email": guest.email,
            });
        }
        items.push(doc);
    }

    let total = items.len();
    Ok(Json(json!({ "bookings": items, "total": total })))
}
