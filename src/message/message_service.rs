use std::sync::Arc;

use crate::error::Result;
use crate::media::MediaUploader;
use crate::message::message_dto::SendMessageRequest;
use crate::message::message_models::{Message, NewMessage};
use crate::message::message_repository::MessageStore;
use crate::user::UserId;
use crate::websocket::{ConnectionManager, WsEvent};

#[derive(Clone)]
pub struct MessageService {
    repo: Arc<dyn MessageStore>,
    uploader: Arc<dyn MediaUploader>,
    ws_manager: ConnectionManager,
}

impl MessageService {
    pub fn new(
        repo: Arc<dyn MessageStore>,
        uploader: Arc<dyn MediaUploader>,
        ws_manager: ConnectionManager,
    ) -> Self {
        Self {
            repo,
            uploader,
            ws_manager,
        }
    }

    pub async fn send_message(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        payload: SendMessageRequest,
    ) -> Result<Message> {
        let image = match payload.image() {
            Some(data) => Some(self.uploader.upload_image(data).await?),
            None => None,
        };

        let message = self
            .repo
            .create(NewMessage {
                sender_id,
                receiver_id,
                text: payload.text().map(str::to_string),
                image,
            })
            .await?;

        // Fire-and-forget: offline receivers pick the message up from history
        if self
            .ws_manager
            .send_to_user(&receiver_id, WsEvent::NewMessage(message.clone()))
        {
            tracing::debug!(message_id = message.id, receiver_id, "pushed newMessage");
        }

        Ok(message)
    }

    pub async fn get_conversation(
        &self,
        user_id: UserId,
        other_user_id: UserId,
    ) -> Result<Vec<Message>> {
        self.repo.find_conversation(user_id, other_user_id).await
    }
}
