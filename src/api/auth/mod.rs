//! Authentication API endpoints
//!
//! Registration, login and current-user info for JWT-based authentication.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::Role;
use crate::infrastructure::user::RegisterUserRequest;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(get_current_user))
}

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_at: String,
    pub user: UserResponse,
}

/// User response (safe to expose)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
}

impl UserResponse {
    fn from_user(user: &crate::domain::user::User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            username: user.username().to_string(),
            email: user.email().map(String::from),
            role: user.role(),
            created_at: user.created_at().to_rfc3339(),
            last_login_at: user.last_login_at().map(|t| t.to_rfc3339()),
        }
    }
}

/// Register a new user account
///
/// POST /auth/register
///
/// New accounts always get the standard role; admin accounts are created
/// at bootstrap only.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    debug!(username = %request.username, "registering user");

    let user = state
        .user_service
        .register(RegisterUserRequest {
            username: request.username,
            password: request.password,
            email: request.email,
            role: Role::Standard,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from_user(&user))))
}

/// Login with username and password
///
/// POST /auth/login
///
/// Returns a bearer token on successful authentication. An unknown
/// username and a wrong password produce the same response.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .user_service
        .authenticate(&request.username, &request.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Incorrect username or password"))?;

    let token = state.token_issuer.generate(&user)?;

    let expires_at = Utc::now() + Duration::minutes(state.token_issuer.ttl_minutes() as i64);

    Ok(Json(LoginResponse {
        token,
        token_type: "bearer".to_string(),
        expires_at: expires_at.to_rfc3339(),
        user: UserResponse::from_user(&user),
    }))
}

/// Get the current authenticated user
///
/// GET /auth/me
pub async fn get_current_user(
    State(state): State<AppState>,
    RequireUser(identity): RequireUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_service
        .get_by_username(&identity.username)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Could not validate credentials"))?;

    Ok(Json(UserResponse::from_user(&user)))
}
