#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chat_api::{
    auth::create_jwt,
    create_router,
    media::MediaUploader,
    message::{Message, MessageService, MessageStore, NewMessage},
    user::{SidebarUser, User, UserId, UserStore},
    websocket::ConnectionManager,
    state::DEFAULT_MAX_BODY_BYTES,
    AppError, AppState, Config, Result,
};
use chrono::{Duration, Utc};
use serde_json::Value;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret";
pub const UPLOADED_URL: &str = "https://example/img.png";

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
    pub fail: AtomicBool,
}

impl InMemoryUsers {
    pub fn with_users(ids: &[UserId]) -> Self {
        let users = ids
            .iter()
            .map(|&id| User {
                id,
                full_name: format!("User {id}"),
                email: format!("user{id}@example.com"),
                profile_pic: None,
                created_at: Utc::now(),
            })
            .collect();
        Self {
            users: Mutex::new(users),
            fail: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUsers {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned())
    }

    async fn find_all_except(&self, user_id: UserId) -> Result<Vec<SidebarUser>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut users: Vec<SidebarUser> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.id != user_id)
            .cloned()
            .map(SidebarUser::from)
            .collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }
}

/// Message store that stamps each insert one second after the previous one.
pub struct InMemoryMessages {
    messages: Mutex<Vec<Message>>,
    next_id: AtomicUsize,
    pub fail: AtomicBool,
}

impl Default for InMemoryMessages {
    fn default() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            fail: AtomicBool::new(false),
        }
    }
}

impl InMemoryMessages {
    pub fn all(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessages {
    async fn create(&self, message: NewMessage) -> Result<Message> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
        let created = Message {
            id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            text: message.text,
            image: message.image,
            created_at: Utc::now() + Duration::seconds(id),
        };
        self.messages.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_conversation(
        &self,
        user_id: UserId,
        other_user_id: UserId,
    ) -> Result<Vec<Message>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut messages: Vec<Message> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.is_between(user_id, other_user_id))
            .cloned()
            .collect();
        messages.sort_by_key(|m| (m.created_at, m.id));
        Ok(messages)
    }
}

#[derive(Default)]
pub struct FixedUploader {
    pub uploads: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl MediaUploader for FixedUploader {
    async fn upload_image(&self, data: &str) -> Result<String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Upload("provider unavailable".into()));
        }
        self.uploads.lock().unwrap().push(data.to_string());
        Ok(UPLOADED_URL.to_string())
    }
}

pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUsers>,
    pub messages: Arc<InMemoryMessages>,
    pub uploader: Arc<FixedUploader>,
    pub connections: ConnectionManager,
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: JWT_SECRET.into(),
        cloudinary_cloud_name: "test".into(),
        cloudinary_api_key: "key".into(),
        cloudinary_api_secret: "secret".into(),
        media_upload_timeout_secs: 5,
        max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        client_origins: vec!["http://localhost:5173".into()],
    }
}

impl TestApp {
    pub fn new(user_ids: &[UserId]) -> Self {
        Self::with_config(user_ids, test_config())
    }

    pub fn with_config(user_ids: &[UserId], config: Config) -> Self {
        let users = Arc::new(InMemoryUsers::with_users(user_ids));
        let messages = Arc::new(InMemoryMessages::default());
        let uploader = Arc::new(FixedUploader::default());
        let connections = ConnectionManager::new();

        let state = AppState {
            config: Arc::new(config),
            ws_connections: connections.clone(),
            user_repository: users.clone(),
            message_service: MessageService::new(
                messages.clone(),
                uploader.clone(),
                connections.clone(),
            ),
        };

        Self {
            router: create_router(state),
            users,
            messages,
            uploader,
            connections,
        }
    }

    pub async fn get(&self, user_id: UserId, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header("authorization", bearer(user_id))
            .body(Body::empty())
            .unwrap();
        self.call(request).await
    }

    pub async fn post(&self, user_id: UserId, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("authorization", bearer(user_id))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.call(request).await
    }

    pub async fn post_raw(&self, user_id: UserId, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("authorization", bearer(user_id))
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        self.call(request).await
    }

    pub async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }
}

pub fn bearer(user_id: UserId) -> String {
    format!("Bearer {}", create_jwt(user_id, JWT_SECRET, 1).unwrap())
}
