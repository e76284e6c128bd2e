use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::{header, request::Parts};

use crate::api::errors::ApiError;
use crate::core::{security, state::AppState};
use crate::db::models::User;
use crate::db::types::UserRole;
use crate::repositories;

/// Any authenticated account.
pub(crate) struct CurrentUser(pub(crate) User);
pub(crate) struct CurrentStudent(pub(crate) User);
pub(crate) struct CurrentTeacher(pub(crate) User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state) = State::<AppState>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to access application state"))?;

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized("Not authenticated."))?;

        let claims = security::verify_token(token, app_state.settings())
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token."))?;
        let user_id = claims
            .user_id()
            .map_err(|_| ApiError::Unauthorized("Invalid token: missing user ID."))?;

        let user = repositories::users::find_by_id(app_state.db(), user_id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load user"))?;

        let Some(user) = user else {
            return Err(ApiError::Unauthorized("User not found."));
        };

        Ok(CurrentUser(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentStudent {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        require_role(user, UserRole::Student, "Student access required.").map(CurrentStudent)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentTeacher {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        require_role(user, UserRole::Teacher, "Teacher access required.").map(CurrentTeacher)
    }
}

fn require_role(user: User, role: UserRole, message: &'static str) -> Result<User, ApiError> {
    if user.role == role {
        Ok(user)
    } else {
        Err(ApiError::Forbidden(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn user(role: UserRole) -> User {
        User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "hash".to_string(),
            role,
            created_at: datetime!(2025-01-01 00:00 UTC),
        }
    }

    #[test]
    fn role_mismatch_is_forbidden() {
        let err = require_role(user(UserRole::Teacher), UserRole::Student, "Student access required.")
            .expect_err("teacher is not a student");
        assert!(matches!(err, ApiError::Forbidden("Student access required.")));

        assert!(require_role(user(UserRole::Teacher), UserRole::Teacher, "Teacher access required.").is_ok());
    }
}
