use async_trait::async_trait;
use sqlx::PgPool;

use super::message_models::{Message, NewMessage};
use crate::{error::Result, user::UserId};

/// Persistence for one-to-one messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn create(&self, message: NewMessage) -> Result<Message>;

    /// Every message exchanged between `user_id` and `other_user_id`, oldest first.
    async fn find_conversation(&self, user_id: UserId, other_user_id: UserId)
        -> Result<Vec<Message>>;
}

#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn create(&self, message: NewMessage) -> Result<Message> {
        let message = sqlx::query_as::<_, Message>(
            "INSERT INTO messages (sender_id, receiver_id, text, image)
             VALUES ($1, $2, $3, $4)
             RETURNING id, sender_id, receiver_id, text, image, created_at",
        )
        .bind(message.sender_id)
        .bind(message.receiver_id)
        .bind(message.text)
        .bind(message.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    async fn find_conversation(
        &self,
        user_id: UserId,
        other_user_id: UserId,
    ) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT id, sender_id, receiver_id, text, image, created_at FROM messages
             WHERE (sender_id = $1 AND receiver_id = $2)
                OR (sender_id = $2 AND receiver_id = $1)
             ORDER BY created_at ASC, id ASC",
        )
        .bind(user_id)
        .bind(other_user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }
}
