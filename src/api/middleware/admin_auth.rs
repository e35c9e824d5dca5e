//! Admin authorization middleware
//!
//! Builds on RequireUser: a missing or invalid token is still a 401, but a
//! valid token without the admin role is a 403.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;

use super::user_auth::{AuthIdentity, RequireUser};

/// Extractor that requires a valid token carrying the admin role
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthIdentity);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireUser(identity) = RequireUser::from_request_parts(parts, state).await?;

        if !identity.is_admin() {
            debug!(username = %identity.username, "admin access denied");
            return Err(ApiError::forbidden(
                "Operation requires administrative privileges",
            ));
        }

        Ok(RequireAdmin(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::http::{Request, StatusCode};

    use crate::api::types::ApiErrorType;
    use crate::domain::user::{Role, User, UserId};
    use crate::infrastructure::auth::{JwtConfig, JwtService};
    use crate::infrastructure::item::{InMemoryItemRepository, ItemService};
    use crate::infrastructure::user::{Argon2Hasher, InMemoryUserRepository, UserService};

    fn test_state() -> AppState {
        AppState::new(
            Arc::new(UserService::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(Argon2Hasher::new()),
            )),
            Arc::new(ItemService::new(Arc::new(InMemoryItemRepository::new()))),
            Arc::new(JwtService::new(JwtConfig::new("test-secret-key-12345", 30))),
        )
    }

    fn token_for(state: &AppState, username: &str, role: Role) -> String {
        let user = User::new(UserId::generate(), username, None, "hashed_password", role);
        state
            .token_issuer
            .generate(&user)
            .expect("token generation")
    }

    fn parts_with_token(token: &str) -> Parts {
        let request = Request::builder()
            .uri("/items")
            .header("Authorization", format!("Bearer {token}"))
            .body(())
            .expect("request build");

        request.into_parts().0
    }

    #[tokio::test]
    async fn test_standard_user_token_is_forbidden() {
        let state = test_state();
        let token = token_for(&state, "alice", Role::Standard);
        let mut parts = parts_with_token(&token);

        let err = RequireAdmin::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.response.error.error_type, ApiErrorType::PermissionError);
        assert_eq!(
            err.response.error.message,
            "Operation requires administrative privileges"
        );
    }

    #[tokio::test]
    async fn test_admin_token_passes_the_gate() {
        let state = test_state();
        let token = token_for(&state, "admin", Role::Admin);
        let mut parts = parts_with_token(&token);

        let RequireAdmin(identity) = RequireAdmin::from_request_parts(&mut parts, &state)
            .await
            .unwrap();

        assert_eq!(identity.username, "admin");
        assert!(identity.is_admin());
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized_not_forbidden() {
        let state = test_state();
        let request = Request::builder().uri("/items").body(()).unwrap();
        let mut parts = request.into_parts().0;

        let err = RequireAdmin::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized_not_forbidden() {
        let state = test_state();
        let mut parts = parts_with_token("not-a-real-token");

        let err = RequireAdmin::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            err.response.error.error_type,
            ApiErrorType::AuthenticationError
        );
    }
}
