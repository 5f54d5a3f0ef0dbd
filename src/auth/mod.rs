pub mod guard;
pub mod password;
pub mod token;

mod login;
mod me;
mod register;

pub use guard::{require_host, AuthUser};
pub(crate) use login::login;
pub(crate) use me::me;
pub(crate) use register::register;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}
