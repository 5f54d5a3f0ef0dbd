use axum::{debug_handler, extract::{Query, State}, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::appresult::AppResult;
use crate::auth::AuthUser;
use crate::models::Conversation;
use crate::store::{ConversationStore, UserStore};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct ConversationQuery {
    participant_id: String,
    property_id: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn create_conversation(
    State(conversations): State<ConversationStore>,
    AuthUser(user): AuthUser,
    Query(ConversationQuery { participant_id, property_id }): Query<ConversationQuery>,
) -> AppResult<Json<Value>> {
    let (conversation, created) = conversations
        .get_or_create(&user.id, &participant_id, property_id.as_deref())
        .await?;

    let message = if created {
        "Conversation created successfully"
    } else {
        "Conversation already exists"
    };

    Ok(Json(json!({
        "conversation_id": conversation.id,
        "message": message,
    })))
}

#[debug_handler(state = AppState)]
pub(crate) async fn list_conversations(
    State(conversations): State<ConversationStore>,
    State(users): State<UserStore>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<Value>> {
    let convs = conversations.list_for_user(&user.id).await?;

    let mut items = Vec::with_capacity(convs.len());
    for conv in convs {
        let mut doc = conversation_doc(&conv);

        let other = match conv.other_participant(&user.id) {
            Some(id) => users.find_by_id(id).await?,
            None => None,
        };
        if let Some(other) = other {
            doc["other_participant"] = json!({
                "id": other.id,
                "first_name": other.first_name,
                "last_name": other.last_name,
                "profile_image": other.profile_image,
            });
        }

        if let Some(last) = conversations.last_message(&conv.id).await? {
            doc["last_message"] = serde_json::to_value(&last)?;
        }

        items.push(doc);
    }

    let total = items.len();
    Ok(Json(json!({ "conversations": items, "total": total })))
}

// participants are exposed as the canonical two-element array
pub(crate) fn conversation_doc(conv: &Conversation) -> Value {
    json!({
        "id": conv.id,
        "participants": [conv.participant_lo, conv.participant_hi],
        "property_id": conv.property_id,
        "created_at": conv.created_at,
        "updated_at": conv.updated_at,
    })
}
