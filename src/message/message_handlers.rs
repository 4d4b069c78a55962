use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, Result},
    extract::AppJson,
    message::message_dto::SendMessageRequest,
    middleware::AuthUser,
    state::AppState,
    user::parse_user_id,
};

/// Send a message to another user
#[utoipa::path(
    post,
    path = "/api/messages/send/{id}",
    tag = "messages",
    params(
        ("id" = String, Path, description = "Receiver's user ID")
    ),
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent successfully", body = crate::message::Message),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Receiver not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(receiver_id): Path<String>,
    AppJson(payload): AppJson<SendMessageRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let receiver_id = parse_user_id(&receiver_id)?;

    state
        .user_repository
        .find_by_id(receiver_id)
        .await?
        .ok_or(AppError::NotFound("Receiver not found".to_string()))?;

    let message = state
        .message_service
        .send_message(user_id, receiver_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Get conversation messages with a specific user
#[utoipa::path(
    get,
    path = "/api/messages/{id}",
    tag = "messages",
    params(
        ("id" = String, Path, description = "Other user ID to get conversation with")
    ),
    responses(
        (status = 200, description = "Conversation messages, oldest first", body = Vec<crate::message::Message>),
        (status = 400, description = "Malformed user ID"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_messages(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(other_user_id): Path<String>,
) -> Result<impl IntoResponse> {
    let other_user_id = parse_user_id(&other_user_id)?;

    let messages = state
        .message_service
        .get_conversation(user_id, other_user_id)
        .await?;

    Ok((StatusCode::OK, Json(messages)))
}
