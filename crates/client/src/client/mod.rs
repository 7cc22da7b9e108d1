//! HTTP client for the boatrent API.

pub mod auth;
pub mod boats;
pub mod bookings;
pub mod health;
pub mod notifications;
pub mod payments;
pub mod reservations;

use crate::error::{ClientError, Result};

/// HTTP client for the boatrent API.
#[derive(Debug, Clone)]
pub struct BoatrentClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl BoatrentClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Create from environment (BOATRENT_URL and BOATRENT_TOKEN).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("BOATRENT_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let client = Self::new(base_url);
        match std::env::var("BOATRENT_TOKEN") {
            Ok(token) => client.with_token(token),
            Err(_) => client,
        }
    }

    /// Sends `Authorization: Bearer <token>` on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.get(self.url(path)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.post(self.url(path)))
    }

    fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.put(self.url(path)))
    }

    fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.patch(self.url(path)))
    }

    fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.delete(self.url(path)))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Decode a success body or turn the response into a [`ClientError`].
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(ClientError::from)
        } else {
            Err(Self::error_from(response).await)
        }
    }

    /// Handle responses with no body (204).
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn error_from(response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        ClientError::from_response(status, &body)
    }
}
