pub mod api_client;
pub mod auth_service;

pub use api_client::{ApiClient, ApiError};
pub use auth_service::{AuthService, AuthStatus};
