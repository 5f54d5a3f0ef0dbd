use sqlx::SqlitePool;

use crate::appresult::AppResult;
use crate::models::{Conversation, Message};

#[derive(Clone)]
pub struct ConversationStore {
    pool: SqlitePool,
}

impl ConversationStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Resolves the unordered (user_a, user_b, property) tuple to exactly one
    /// conversation. Insert-if-absent rides on the unique identity index, so
    /// two concurrent first contacts converge on a single row. Returns the
    /// conversation and whether this call created it.
    pub async fn get_or_create(
        &self,
        user_a: &str,
        user_b: &str,
        property_id: Option<&str>,
    ) -> AppResult<(Conversation, bool)> {
        let candidate = Conversation::new(user_a, user_b, property_id.map(str::to_owned));

        let created = sqlx::query(
            "INSERT INTO conversations (id, participant_lo, participant_hi, property_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             ON CONFLICT DO NOTHING",
        )
        .bind(&candidate.id)
        .bind(&candidate.participant_lo)
        .bind(&candidate.participant_hi)
        .bind(&candidate.property_id)
        .bind(candidate.created_at)
        .bind(candidate.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected()
            == 1;

        // IS instead of = so a NULL property context still matches
        let conversation = sqlx::query_as::<_, Conversation>(
            "SELECT * FROM conversations \
             WHERE participant_lo = ? AND participant_hi = ? AND property_id IS ?",
        )
        .bind(&candidate.participant_lo)
        .bind(&candidate.participant_hi)
        .bind(&candidate.property_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((conversation, created))
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Conversation>> {
        Ok(sqlx::query_as::<_, Conversation>("SELECT * FROM conversations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Conversation>> {
        Ok(sqlx::query_as::<_, Conversation>(
            "SELECT * FROM conversations \
             WHERE participant_lo = ? OR participant_hi = ? \
             ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    /// Appends the message and bumps the conversation's updated_at together.
    pub async fn append_message(&self, m: &Message) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO messages (id, conversation_id, sender_id, content, message_type, is_read, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&m.id)
        .bind(&m.conversation_id)
        .bind(&m.sender_id)
        .bind(&m.content)
        .bind(&m.message_type)
        .bind(m.is_read)
        .bind(m.created_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE conversations SET updated_at = ? WHERE id = ?")
            .bind(m.created_at)
            .bind(&m.conversation_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn find_message(&self, id: &str) -> AppResult<Option<Message>> {
        Ok(sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn messages_for(&self, conversation_id: &str) -> AppResult<Vec<Message>> {
        Ok(sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE conversation_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn last_message(&self, conversation_id: &str) -> AppResult<Option<Message>> {
        Ok(sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE conversation_id = ? \
             ORDER BY created_at DESC, id DESC LIMIT 1",
        )
        .bind(conversation_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    pub async fn mark_read(&self, message_id: &str) -> AppResult<()> {
        sqlx::query("UPDATE messages SET is_read = 1 WHERE id = ?")
            .bind(message_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
