//! HTTP handlers for auth routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use boatrent_core::auth::{
    normalize_email, validate_registration, AuthError as CoreError, AuthResponse, LoginRequest,
    RefreshRequest, RegisterRequest, TokenPair, TokenType,
};
use boatrent_core::rental::User;
use boatrent_core::storage::RepositoryError;
use chrono::Utc;

use crate::error::AuthError;
use crate::extractors::{AuthJson, CurrentUser};
use crate::password::{hash_password, verify_password};
use crate::AuthState;

/// Creates the auth router.
///
/// Routes:
/// - `POST /auth/register` - Create an account and return tokens
/// - `POST /auth/login` - Exchange email and password for tokens
/// - `POST /auth/refresh` - Exchange a refresh token for a new pair
/// - `GET /auth/me` - Get current authenticated user
pub fn auth_routes() -> Router<AuthState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/me", get(me))
}

async fn register(
    State(state): State<AuthState>,
    AuthJson(request): AuthJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthError> {
    validate_registration(&request)?;

    let email = normalize_email(&request.email);
    if state.users.get_user_by_email(&email).await?.is_some() {
        return Err(CoreError::EmailTaken.into());
    }

    let password_hash = hash_password(&request.password, state.config.bcrypt_cost).await?;
    let mut user = User::new(email, request.name.trim(), request.role, password_hash);
    if let Some(phone) = request.phone.filter(|p| !p.trim().is_empty()) {
        user = user.with_phone(phone.trim());
    }

    state.users.create_user(&user).await.map_err(|e| match e {
        RepositoryError::AlreadyExists { .. } => AuthError::from(CoreError::EmailTaken),
        other => other.into(),
    })?;

    let tokens = state.tokens.issue_pair(&user, Utc::now())?;
    tracing::info!(user_id = %user.id, role = %user.role, "User registered");

    Ok((StatusCode::CREATED, Json(AuthResponse::new(user, tokens))))
}

async fn login(
    State(state): State<AuthState>,
    AuthJson(request): AuthJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let email = normalize_email(&request.email);
    let user = state
        .users
        .get_user_by_email(&email)
        .await?
        .ok_or(CoreError::InvalidCredentials)?;

    if !verify_password(&request.password, &user.password_hash).await? {
        return Err(CoreError::InvalidCredentials.into());
    }

    let tokens = state.tokens.issue_pair(&user, Utc::now())?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse::new(user, tokens)))
}

async fn refresh(
    State(state): State<AuthState>,
    AuthJson(request): AuthJson<RefreshRequest>,
) -> Result<Json<TokenPair>, AuthError> {
    let now = Utc::now();
    let claims = state
        .tokens
        .verify(&request.refresh_token, TokenType::Refresh, now)?;

    // Re-read the user so role changes land in the new access token.
    let user = state
        .users
        .get_user(claims.sub)
        .await?
        .ok_or(CoreError::UserNotFound)?;

    Ok(Json(state.tokens.issue_pair(&user, now)?))
}

async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{body::Body, http::Request};
    use boatrent_core::storage::{Result as RepoResult, UserRepository};
    use http_body_util::BodyExt;
    use tokio::sync::RwLock;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::AuthConfig;

    #[derive(Default)]
    struct TestUsers {
        users: RwLock<HashMap<Uuid, User>>,
    }

    #[async_trait]
    impl UserRepository for TestUsers {
        async fn get_user(&self, id: Uuid) -> RepoResult<Option<User>> {
            Ok(self.users.read().await.get(&id).cloned())
        }

        async fn get_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
            let users = self.users.read().await;
            Ok(users.values().find(|u| u.email == email).cloned())
        }

        async fn create_user(&self, user: &User) -> RepoResult<()> {
            self.users.write().await.insert(user.id, user.clone());
            Ok(())
        }

        async fn update_user(&self, user: &User) -> RepoResult<()> {
            self.users.write().await.insert(user.id, user.clone());
            Ok(())
        }
    }

    fn app() -> Router {
        let config = AuthConfig::new("test-secret").with_bcrypt_cost(4);
        auth_routes().with_state(AuthState::new(Arc::new(TestUsers::default()), config))
    }

    async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap_or_default())
    }

    fn registration() -> serde_json::Value {
        serde_json::json!({
            "email": "Ana@Example.com",
            "password": "secreto123",
            "name": "Ana"
        })
    }

    #[tokio::test]
    async fn register_returns_user_and_tokens() {
        let app = app();
        let (status, body) = post_json(&app, "/auth/register", registration()).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["email"], "ana@example.com");
        assert_eq!(body["user"]["role"], "customer");
        assert!(body["user"].get("passwordHash").is_none());
        assert!(body["token"].as_str().is_some());
        assert!(body["refreshToken"].as_str().is_some());
    }

    #[tokio::test]
    async fn register_duplicate_email_is_bad_request() {
        let app = app();
        post_json(&app, "/auth/register", registration()).await;

        let (status, body) = post_json(&app, "/auth/register", registration()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "El correo electrónico ya está registrado");
    }

    #[tokio::test]
    async fn register_rejects_short_password() {
        let app = app();
        let (status, body) = post_json(
            &app,
            "/auth/register",
            serde_json::json!({"email": "ana@example.com", "password": "corta", "name": "Ana"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "La contraseña debe tener al menos 8 caracteres");
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let app = app();
        post_json(&app, "/auth/register", registration()).await;

        let (status, body) = post_json(
            &app,
            "/auth/login",
            serde_json::json!({"email": "ana@example.com", "password": "incorrecta"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Credenciales inválidas");
    }

    #[tokio::test]
    async fn login_then_me() {
        let app = app();
        post_json(&app, "/auth/register", registration()).await;

        let (status, body) = post_json(
            &app,
            "/auth/login",
            serde_json::json!({"email": " ANA@example.com ", "password": "secreto123"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let token = body["token"].as_str().unwrap();
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/auth/me")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let user: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(user["name"], "Ana");
    }

    #[tokio::test]
    async fn me_without_token_is_unauthorized() {
        let response = app()
            .oneshot(Request::builder().uri("/auth/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn refresh_issues_new_pair() {
        let app = app();
        let (_, registered) = post_json(&app, "/auth/register", registration()).await;

        let (status, body) = post_json(
            &app,
            "/auth/refresh",
            serde_json::json!({"refreshToken": registered["refreshToken"]}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].as_str().is_some());
        assert!(body["refreshToken"].as_str().is_some());
    }

    #[tokio::test]
    async fn refresh_rejects_access_token() {
        let app = app();
        let (_, registered) = post_json(&app, "/auth/register", registration()).await;

        let (status, _) = post_json(
            &app,
            "/auth/refresh",
            serde_json::json!({"refreshToken": registered["token"]}),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let (status, body) = post_json(&app(), "/auth/login", serde_json::json!({"email": 42})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Solicitud inválida"));
    }
}
