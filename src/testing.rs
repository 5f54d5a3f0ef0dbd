use chrono::NaiveDate;
use tempfile::NamedTempFile;

use crate::auth::password;
use crate::auth::token::TokenKeys;
use crate::models::{
    Booking, BookingCreate, Property, PropertyCreate, PropertyType, User, UserCreate, UserRole,
};
use crate::{db, AppState};

pub const TEST_PASSWORD: &str = "password123";

/// AppState over a throwaway sqlite file; the file goes away on drop.
pub struct TestApp {
    pub state: AppState,
    _db_file: NamedTempFile,
}

pub async fn setup() -> TestApp {
    let db_file = NamedTempFile::new().expect("temp db file");
    let url = format!("sqlite:{}?mode=rwc", db_file.path().display());
    let pool = db::connect(&url).await.expect("pool");
    db::migrate(&pool).await.expect("schema");
    TestApp {
        state: AppState::new(pool, TokenKeys::new("test-secret", 60)),
        _db_file: db_file,
    }
}

pub async fn make_user(state: &AppState, email: &str, user_type: UserRole) -> User {
    let user = User::new(
        UserCreate {
            email: email.to_owned(),
            password: TEST_PASSWORD.to_owned(),
            first_name: "Test".to_owned(),
            last_name: "User".to_owned(),
            phone: None,
            user_type,
            profile_image: None,
        },
        password::hash(TEST_PASSWORD).expect("hash"),
    );
    state.users.insert(&user).await.expect("insert user");
    user
}

pub fn property_payload() -> PropertyCreate {
    PropertyCreate {
        title: "Sea-view flat".to_owned(),
        description: "Two rooms overlooking the harbour".to_owned(),
        property_type: PropertyType::Apartment,
        price_per_night: 90.0,
        location: serde_json::json!({ "city": "Porto", "country": "Portugal" }),
        amenities: vec!["wifi".to_owned(), "kitchen".to_owned()],
        images: vec![
            "https://img.example/flat-1.jpg".to_owned(),
            "https://img.example/flat-2.jpg".to_owned(),
        ],
        max_guests: 4,
        bedrooms: 2,
        bathrooms: 1,
    }
}

pub async fn make_property(state: &AppState, host_id: &str) -> Property {
    let property = Property::new(host_id, property_payload()).expect("payload is valid");
    state.properties.insert(&property).await.expect("insert property");
    property
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("date literal")
}

pub fn booking_payload(property_id: &str, check_in: &str, check_out: &str) -> BookingCreate {
    BookingCreate {
        property_id: property_id.to_owned(),
        check_in: date(check_in),
        check_out: date(check_out),
        guests: 2,
        total_price: 270.0,
    }
}

pub async fn make_booking(
    state: &AppState,
    property: &Property,
    guest_id: &str,
    check_in: &str,
    check_out: &str,
) -> Booking {
    let booking = Booking::new(
        property,
        guest_id,
        booking_payload(&property.id, check_in, check_out),
    )
    .expect("payload is valid");
    let inserted = state
        .bookings
        .create_if_available(&booking)
        .await
        .expect("insert booking");
    assert!(inserted, "fixture dates must be free");
    booking
}
