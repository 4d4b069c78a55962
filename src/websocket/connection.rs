use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::types::WsEvent;
use crate::user::UserId;

pub type WsSender = mpsc::UnboundedSender<WsEvent>;

/// Registry of live realtime connections, one per user.
#[derive(Clone, Default)]
pub struct ConnectionManager {
    connections: Arc<DashMap<UserId, WsSender>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `tx` for `user_id`, replacing any older connection.
    pub fn add_connection(&self, user_id: UserId, tx: WsSender) {
        if self.connections.insert(user_id, tx).is_some() {
            tracing::debug!(user_id, "replaced existing realtime connection");
        }
    }

    /// Removes the connection for `user_id` only if it is still `tx`, so a
    /// closing socket cannot evict a newer one.
    pub fn remove_connection(&self, user_id: &UserId, tx: &WsSender) {
        self.connections
            .remove_if(user_id, |_, current| current.same_channel(tx));
    }

    /// Registers a freshly opened socket and tells every connection who is online.
    pub fn connect(&self, user_id: UserId, tx: WsSender) {
        self.add_connection(user_id, tx);
        self.broadcast_online_users();
    }

    /// Unregisters a closed socket and tells the remaining connections who is online.
    pub fn disconnect(&self, user_id: &UserId, tx: &WsSender) {
        self.remove_connection(user_id, tx);
        self.broadcast_online_users();
    }

    fn broadcast_online_users(&self) {
        self.broadcast(WsEvent::OnlineUsers(self.online_users()));
    }

    pub fn is_online(&self, user_id: &UserId) -> bool {
        self.connections.contains_key(user_id)
    }

    pub fn online_users(&self) -> Vec<UserId> {
        let mut users: Vec<UserId> = self.connections.iter().map(|e| *e.key()).collect();
        users.sort_unstable();
        users
    }

    /// Pushes `event` to the user's connection. Returns `false` when the user
    /// has no live connection.
    pub fn send_to_user(&self, user_id: &UserId, event: WsEvent) -> bool {
        let Some(tx) = self.connections.get(user_id).map(|e| e.value().clone()) else {
            return false;
        };

        if tx.send(event).is_err() {
            self.remove_connection(user_id, &tx);
            return false;
        }
        true
    }

    pub fn broadcast(&self, event: WsEvent) {
        for entry in self.connections.iter() {
            let _ = entry.value().send(event.clone());
        }
    }
}
