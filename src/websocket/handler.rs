use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;

use super::types::WsEvent;
use crate::{middleware::AuthUser, state::AppState, user::UserId};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Realtime channel for chat events.
///
/// The server only pushes (`newMessage`, `getOnlineUsers`, `ping`); client
/// text frames are ignored and a close frame ends the session.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, user_id, state))
}

async fn handle_socket(socket: WebSocket, user_id: UserId, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<WsEvent>();

    state.ws_connections.connect(user_id, tx.clone());
    tracing::info!("Realtime connection opened for user {}", user_id);

    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::error!("Failed to serialize {} event: {}", event.name(), e),
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    let tx_heartbeat = tx.clone();
    let mut heartbeat_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(HEARTBEAT_INTERVAL);
        loop {
            interval.tick().await;
            if tx_heartbeat.send(WsEvent::Ping).is_err() {
                break;
            }
        }
    });

    // Stop all tasks when any one finishes
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
            heartbeat_task.abort();
        },
        _ = &mut recv_task => {
            send_task.abort();
            heartbeat_task.abort();
        },
        _ = &mut heartbeat_task => {
            send_task.abort();
            recv_task.abort();
        }
    }

    state.ws_connections.disconnect(&user_id, &tx);

    tracing::info!("Realtime connection closed for user {}", user_id);
}
