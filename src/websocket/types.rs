use serde::{Deserialize, Serialize};

use crate::{message::Message, user::UserId};

/// Server-to-client realtime events, framed as `{"event": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum WsEvent {
    #[serde(rename = "newMessage")]
    NewMessage(Message),
    #[serde(rename = "getOnlineUsers")]
    OnlineUsers(Vec<UserId>),
    #[serde(rename = "ping")]
    Ping,
}

impl WsEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WsEvent::NewMessage(_) => "newMessage",
            WsEvent::OnlineUsers(_) => "getOnlineUsers",
            WsEvent::Ping => "ping",
        }
    }
}
