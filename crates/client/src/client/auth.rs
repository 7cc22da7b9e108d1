//! Account API operations.

use super::BoatrentClient;
use crate::error::Result;
use boatrent_core::auth::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest, TokenPair};
use boatrent_core::rental::User;

impl BoatrentClient {
    /// Create an account.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let response = self.post("/api/auth/register").json(request).send().await?;
        self.handle_response(response).await
    }

    /// Exchange credentials for tokens.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.post("/api/auth/login").json(&request).send().await?;
        self.handle_response(response).await
    }

    /// Exchange a refresh token for a new pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let request = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        let response = self.post("/api/auth/refresh").json(&request).send().await?;
        self.handle_response(response).await
    }

    /// The account behind the current token.
    pub async fn me(&self) -> Result<User> {
        let response = self.get("/api/auth/me").send().await?;
        self.handle_response(response).await
    }
}
