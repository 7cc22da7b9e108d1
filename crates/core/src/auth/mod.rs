mod error;
mod functions;
mod types;
mod validation;

pub use error::AuthError;
pub use functions::{build_claims, is_token_expired, normalize_email, parse_duration};
pub use types::{
    AuthResponse, Claims, LoginRequest, RefreshRequest, RegisterRequest, TokenPair, TokenType,
};
pub use validation::validate_registration;
