mod conversations;
mod msg;

pub(crate) use conversations::{create_conversation, list_conversations};
pub(crate) use msg::{get_messages, mark_read, send_message};

use axum::{routing::{get, post, put}, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/conversations", post(create_conversation).get(list_conversations))
        .route("/", post(send_message))
        // both params share the segment name so the routes can coexist
        .route("/{id}", get(get_messages))
        .route("/{id}/read", put(mark_read))
}
