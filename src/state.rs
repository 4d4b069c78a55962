use anyhow::Context;
use std::sync::Arc;

use crate::{
    message::message_service::MessageService, user::user_repository::UserStore,
    websocket::ConnectionManager,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ws_connections: ConnectionManager,
    pub user_repository: Arc<dyn UserStore>,
    pub message_service: MessageService,
}

pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub cloudinary_cloud_name: String,
    pub cloudinary_api_key: String,
    pub cloudinary_api_secret: String,
    pub media_upload_timeout_secs: u64,
    /// Request body cap for the message routes; inline images travel as base64 JSON.
    pub max_body_bytes: usize,
    pub client_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            jwt_secret: required("JWT_SECRET")?,
            cloudinary_cloud_name: required("CLOUDINARY_CLOUD_NAME")?,
            cloudinary_api_key: required("CLOUDINARY_API_KEY")?,
            cloudinary_api_secret: required("CLOUDINARY_API_SECRET")?,
            media_upload_timeout_secs: std::env::var("MEDIA_UPLOAD_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("MEDIA_UPLOAD_TIMEOUT_SECS must be a number")?,
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .map(|raw| raw.parse::<usize>())
                .unwrap_or(Ok(DEFAULT_MAX_BODY_BYTES))
                .context("MAX_BODY_BYTES must be a number of bytes")?,
            client_origins: parse_origins(
                &std::env::var("CLIENT_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            ),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &"<redacted>")
            .field("cloudinary_cloud_name", &self.cloudinary_cloud_name)
            .field("cloudinary_api_key", &self.cloudinary_api_key)
            .field("cloudinary_api_secret", &"<redacted>")
            .field("media_upload_timeout_secs", &self.media_upload_timeout_secs)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("client_origins", &self.client_origins)
            .finish()
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).with_context(|| format!("{key} must be set"))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
