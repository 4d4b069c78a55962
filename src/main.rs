use anyhow::Context;
use chat_api::{
    create_router,
    db::{create_pool, run_migrations},
    media::CloudinaryUploader,
    message::{MessageRepository, MessageService},
    user::UserRepository,
    websocket::ConnectionManager,
    AppState, Config,
};
use std::{sync::Arc, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,chat_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);

    // Sanitize URL for logging (hide password)
    let url_for_logging = config
        .database_url
        .split('@')
        .next()
        .map(|part| format!("{}@<hidden>", part))
        .unwrap_or_else(|| "<invalid format>".to_string());

    tracing::info!("Connecting to database at {}...", url_for_logging);
    let db = create_pool(&config.database_url)
        .await
        .with_context(|| format!("failed to connect to database at {url_for_logging}"))?;

    tracing::info!("Running migrations...");
    run_migrations(&db).await.context("failed to run migrations")?;

    let ws_connections = ConnectionManager::new();

    let uploader = CloudinaryUploader::new(
        &config.cloudinary_cloud_name,
        config.cloudinary_api_key.clone(),
        config.cloudinary_api_secret.clone(),
        Duration::from_secs(config.media_upload_timeout_secs),
    )?;

    let message_service = MessageService::new(
        Arc::new(MessageRepository::new(db.clone())),
        Arc::new(uploader),
        ws_connections.clone(),
    );

    let state = AppState {
        config: config.clone(),
        ws_connections,
        user_repository: Arc::new(UserRepository::new(db)),
        message_service,
    };

    let app = create_router(state);

    let addr = config.bind_addr();
    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
