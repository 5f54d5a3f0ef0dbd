use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::appresult::{AppError, AppResult};
use crate::bookings::availability::StayRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum UserRole {
    Guest,
    Host,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Villa,
    Room,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Legal moves: pending -> confirmed | cancelled, confirmed -> cancelled
    /// | completed. Cancelled and completed are terminal. Re-asserting the
    /// current status is a no-op and allowed.
    pub fn can_transition(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        match (self, next) {
            (a, b) if a == b => true,
            (Pending, Confirmed | Cancelled) => true,
            (Confirmed, Cancelled | Completed) => true,
            _ => false,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub user_type: UserRole,
    pub profile_image: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(payload: UserCreate, password_hash: String) -> User {
        let now = Utc::now();
        User {
            id: Uuid::now_v7().to_string(),
            email: payload.email,
            password_hash,
            first_name: payload.first_name,
            last_name: payload.last_name,
            phone: payload.phone,
            user_type: payload.user_type,
            profile_image: payload.profile_image,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Property {
    pub id: String,
    pub host_id: String,
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub price_per_night: f64,
    #[sqlx(json)]
    pub location: serde_json::Value,
    #[sqlx(json)]
    pub amenities: Vec<String>,
    #[sqlx(json)]
    pub images: Vec<String>,
    pub max_guests: i64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub is_active: bool,
    pub rating: f64,
    pub review_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn new(host_id: &str, p: PropertyCreate) -> AppResult<Property> {
        if p.price_per_night <= 0.0 {
            return Err(AppError::Validation("price_per_night must be positive".to_owned()));
        }
        if p.max_guests < 1 {
            return Err(AppError::Validation("max_guests must be at least 1".to_owned()));
        }
        if p.bedrooms < 0 || p.bathrooms < 0 {
            return Err(AppError::Validation("bedrooms and bathrooms cannot be negative".to_owned()));
        }

        let now = Utc::now();
        Ok(Property {
            id: Uuid::now_v7().to_string(),
            host_id: host_id.to_owned(),
            title: p.title,
            description: p.description,
            property_type: p.property_type,
            price_per_night: p.price_per_night,
            location: p.location,
            amenities: p.amenities,
            images: p.images,
            max_guests: p.max_guests,
            bedrooms: p.bedrooms,
            bathrooms: p.bathrooms,
            is_active: true,
            rating: 0.0,
            review_count: 0,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: String,
    pub property_id: String,
    pub guest_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i64,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(property: &Property, guest_id: &str, b: BookingCreate) -> AppResult<Booking> {
        let range = StayRange::new(b.check_in, b.check_out)?;
        if b.guests < 1 || b.guests > property.max_guests {
            return Err(AppError::Validation(format!(
                "guests must be between 1 and {}",
                property.max_guests
            )));
        }

        let now = Utc::now();
        Ok(Booking {
            id: Uuid::now_v7().to_string(),
            property_id: property.id.clone(),
            guest_id: guest_id.to_owned(),
            check_in: range.check_in,
            check_out: range.check_out,
            guests: b.guests,
            total_price: b.total_price,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Conversation {
    pub id: String,
    pub participant_lo: String,
    pub participant_hi: String,
    pub property_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(user_a: &str, user_b: &str, property_id: Option<String>) -> Conversation {
        let (participant_lo, participant_hi) = Conversation::canonical_pair(user_a, user_b);
        let now = Utc::now();
        Conversation {
            id: Uuid::now_v7().to_string(),
            participant_lo,
            participant_hi,
            // a blank context is no context; the identity index folds
            // '' and NULL into one key
            property_id: property_id.filter(|p| !p.is_empty()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sorts the two ids so lookups are independent of argument order.
    pub fn canonical_pair(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_owned(), b.to_owned())
        } else {
            (b.to_owned(), a.to_owned())
        }
    }

    pub fn includes(&self, user_id: &str) -> bool {
        self.participant_lo == user_id || self.participant_hi == user_id
    }

    /// First participant in canonical order that is not `user_id`. None when
    /// the caller is both participants (a conversation with oneself).
    pub fn other_participant(&self, user_id: &str) -> Option<&str> {
        if self.participant_lo != user_id {
            Some(&self.participant_lo)
        } else if self.participant_hi != user_id {
            Some(&self.participant_hi)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
    pub message_type: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(sender_id: &str, m: MessageCreate) -> Message {
        Message {
            id: Uuid::now_v7().to_string(),
            conversation_id: m.conversation_id,
            sender_id: sender_id.to_owned(),
            content: m.content,
            message_type: m.message_type,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub user_type: UserRole,
    pub profile_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PropertyCreate {
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub price_per_night: f64,
    pub location: serde_json::Value,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub max_guests: i64,
    pub bedrooms: i64,
    pub bathrooms: i64,
}

#[derive(Debug, Deserialize)]
pub struct BookingCreate {
    pub property_id: String,
    #[serde(deserialize_with = "de_stay_date")]
    pub check_in: NaiveDate,
    #[serde(deserialize_with = "de_stay_date")]
    pub check_out: NaiveDate,
    pub guests: i64,
    pub total_price: f64,
}

#[derive(Debug, Deserialize)]
pub struct MessageCreate {
    pub conversation_id: String,
    pub content: String,
    #[serde(default = "default_message_type")]
    pub message_type: String,
}

fn default_message_type() -> String {
    "text".to_owned()
}

/// Accepts a bare date or an ISO datetime, keeping the date part.
pub fn parse_stay_date(s: &str) -> Result<NaiveDate, String> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }
    Err(format!("invalid date: {s}"))
}

fn de_stay_date<'de, D>(d: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;
    parse_stay_date(&s).map_err(serde::de::Error::custom)
}
