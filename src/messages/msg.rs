use axum::{debug_handler, extract::{Path, State}, Json};
use serde_json::{json, Value};

use crate::appresult::{AppError, AppResult};
use crate::auth::AuthUser;
use crate::models::{Conversation, Message, MessageCreate, User};
use crate::store::ConversationStore;
use crate::AppState;

fn require_participant(conversation: &Conversation, user: &User, detail: &str) -> AppResult<()> {
    if !conversation.includes(&user.id) {
        return Err(AppError::Forbidden(detail.to_owned()));
    }
    Ok(())
}

#[debug_handler(state = AppState)]
pub(crate) async fn send_message(
    State(conversations): State<ConversationStore>,
    AuthUser(user): AuthUser,
    Json(payload): Json<MessageCreate>,
) -> AppResult<Json<Value>> {
    let conversation = conversations
        .find_by_id(&payload.conversation_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Conversation not found".to_owned()))?;
    require_participant(&conversation, &user, "You are not a participant in this conversation")?;

    let message = Message::new(&user.id, payload);
    conversations.append_message(&message).await?;

    Ok(Json(json!({
        "message": "Message sent successfully",
        "message_id": message.id,
    })))
}

#[debug_handler(state = AppState)]
pub(crate) async fn get_messages(
    State(conversations): State<ConversationStore>,
    AuthUser(user): AuthUser,
    Path(conversation_id): Path<String>,
) -> AppResult<Json<Value>> {
    let conversation = conversations
        .find_by_id(&conversation_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Conversation not found".to_owned()))?;
    require_participant(&conversation, &user, "You are not a participant in this conversation")?;

    let messages = conversations.messages_for(&conversation.id).await?;
    let total = messages.len();

    Ok(Json(json!({ "messages": messages, "total": total })))
}

#[debug_handler(state = AppState)]
pub(crate) async fn mark_read(
    State(conversations): State<ConversationStore>,
    AuthUser(user): AuthUser,
    Path(message_id): Path<String>,
) -> AppResult<Json<Value>> {
    let message = conversations
        .find_message(&message_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Message not found".to_owned()))?;

    // a reader must be in the message's conversation; a missing conversation
    // row means nobody qualifies
    let permitted = match conversations.find_by_id(&message.conversation_id).await? {
        Some(conversation) => conversation.includes(&user.id),
        None => false,
    };
    if !permitted {
        return Err(AppError::Forbidden(
            "You don't have permission to mark this message as read".to_owned(),
        ));
    }

    conversations.mark_read(&message.id).await?;

    Ok(Json(json!({ "message": "Message marked as read" })))
}
