use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::{AppError, Result};

pub type UserId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Projection of [`User`] shown in the chat sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SidebarUser {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub profile_pic: Option<String>,
}

impl From<User> for SidebarUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            profile_pic: user.profile_pic,
        }
    }
}

/// Parses a user id taken from a route path.
pub fn parse_user_id(raw: &str) -> Result<UserId> {
    match raw.trim().parse::<UserId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::BadRequest(format!("Invalid user id: {raw}"))),
    }
}
