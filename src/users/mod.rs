mod profile;
mod public;

pub(crate) use profile::{get_profile, update_profile};
pub(crate) use public::get_user;

use axum::{routing::get, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/{user_id}", get(get_user))
}
