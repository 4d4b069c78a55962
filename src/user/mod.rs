pub mod user_handlers;
pub mod user_models;
pub mod user_repository;

pub use user_models::{parse_user_id, SidebarUser, User, UserId};
pub use user_repository::{UserRepository, UserStore};
