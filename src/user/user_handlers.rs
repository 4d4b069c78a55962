use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{error::Result, middleware::AuthUser, state::AppState};

/// List every user the caller can chat with
#[utoipa::path(
    get,
    path = "/api/messages/users",
    tag = "messages",
    responses(
        (status = 200, description = "All users except the caller", body = Vec<crate::user::SidebarUser>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_users_for_sidebar(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse> {
    let users = state.user_repository.find_all_except(user_id).await?;

    tracing::debug!(user_id, count = users.len(), "listed sidebar users");

    Ok((StatusCode::OK, Json(users)))
}
