use async_trait::async_trait;
use sqlx::PgPool;

use super::user_models::{SidebarUser, User, UserId};
use crate::error::Result;

/// Read access to users.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>>;

    /// Every user except `user_id`, in id order.
    async fn find_all_except(&self, user_id: UserId) -> Result<Vec<SidebarUser>>;
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, full_name, email, profile_pic, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_all_except(&self, user_id: UserId) -> Result<Vec<SidebarUser>> {
        let users = sqlx::query_as::<_, SidebarUser>(
            "SELECT id, full_name, email, profile_pic FROM users
             WHERE id <> $1
             ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
