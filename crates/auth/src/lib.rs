//! Password and JWT authentication for boatrent.
//!
//! This crate provides:
//! - bcrypt password hashing off the async runtime
//! - HS256 access and refresh tokens
//! - An axum extractor resolving the bearer token to a [`User`](boatrent_core::rental::User)
//! - The `/auth/*` routes (register, login, refresh, me)

mod config;
mod error;
mod extractors;
mod handlers;
mod jwt;
mod password;
mod state;

pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::CurrentUser;
pub use handlers::auth_routes;
pub use jwt::TokenService;
pub use password::{hash_password, verify_password};
pub use state::AuthState;
