//! HTTP endpoint implementations for users CRUD and health.

pub mod health_handlers;
pub mod request_utils;
pub mod response;
pub mod user_handlers;

pub use health_handlers::health;
pub use response::{error_response, ApiError, ErrorResponse};
pub use user_handlers::{create_user, delete_user, list_users, read_user, update_user};
