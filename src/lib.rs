pub mod auth;
pub mod db;
pub mod error;
pub mod extract;
pub mod media;
pub mod message;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod user;
pub mod websocket;

pub use error::{AppError, Result};
pub use routes::create_router;
pub use state::{AppState, Config};
