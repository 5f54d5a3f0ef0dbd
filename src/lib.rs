pub mod appresult;
pub mod auth;
pub mod bookings;
pub mod config;
pub mod db;
pub mod messages;
pub mod models;
pub mod properties;
pub mod store;
pub mod users;

#[cfg(test)]
mod testing;


use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::auth::token::TokenKeys;
use crate::store::{BookingStore, ConversationStore, PropertyStore, UserStore};

pub use appresult::{AppError, AppResult};

/// Everything a handler can reach: one store per entity over the shared
/// pool, plus the token service. FromRef lets handlers pull any single
/// piece with `State<...>`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub users: UserStore,
    pub properties: PropertyStore,
    pub bookings: BookingStore,
    pub conversations: ConversationStore,
    pub tokens: TokenKeys,
}

impl AppState {
    pub fn new(pool: SqlitePool, tokens: TokenKeys) -> Self {
        Self {
            users: UserStore::new(pool.clone()),
            properties: PropertyStore::new(pool.clone()),
            bookings: BookingStore::new(pool.clone()),
            conversations: ConversationStore::new(pool),
            tokens,
        }
    }
}
