use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::api::validation::{normalize_email, validate_payload};
use crate::core::redis::RateLimit;
use crate::core::security;
use crate::core::state::AppState;
use crate::db::models::User;
use crate::repositories;
use crate::schemas::auth::TokenResponse;
use crate::schemas::user::{UserLogin, UserRegister, UserResponse};

const REGISTER_LIMIT: RateLimit = RateLimit { scope: "register", limit: 10, window_seconds: 60 };
const LOGIN_LIMIT: RateLimit = RateLimit { scope: "login", limit: 10, window_seconds: 60 };

const INVALID_CREDENTIALS: &str = "Invalid email or password.";

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<UserRegister>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    validate_payload(&payload)?;
    let email = normalize_email(&payload.email);

    if !state.redis().allow(REGISTER_LIMIT, &email).await {
        return Err(ApiError::TooManyRequests("Too many registration attempts, try again later"));
    }

    let existing = repositories::users::exists_by_email(state.db(), &email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check existing user"))?;
    if existing {
        return Err(ApiError::Conflict("An account with this email already exists.".to_string()));
    }

    let password_hash = security::hash_password(&payload.password)
        .map_err(|e| ApiError::internal(e, "Failed to hash password"))?;

    let user = repositories::users::create(
        state.db(),
        repositories::users::CreateUser {
            name: payload.name.trim(),
            email: &email,
            password_hash,
            role: payload.role,
        },
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ApiError::Conflict("An account with this email already exists.".to_string())
        }
        other => ApiError::internal(other, "Failed to create user"),
    })?;

    tracing::info!(user_id = user.id, role = user.role.as_str(), "User registered");

    Ok((StatusCode::CREATED, Json(issue_token(&state, user)?)))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<UserLogin>,
) -> Result<Json<TokenResponse>, ApiError> {
    validate_payload(&payload).map_err(|_| ApiError::Unauthorized(INVALID_CREDENTIALS))?;
    let email = normalize_email(&payload.email);

    if !state.redis().allow(LOGIN_LIMIT, &email).await {
        return Err(ApiError::TooManyRequests("Too many login attempts, try again later"));
    }

    let user = repositories::users::find_by_email(state.db(), &email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user"))?
        .ok_or(ApiError::Unauthorized(INVALID_CREDENTIALS))?;

    let verified = security::verify_password(&payload.password, &user.password_hash)
        .map_err(|_| ApiError::Unauthorized(INVALID_CREDENTIALS))?;
    if !verified {
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS));
    }

    Ok(Json(issue_token(&state, user)?))
}

async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from_db(user))
}

fn issue_token(state: &AppState, user: User) -> Result<TokenResponse, ApiError> {
    let token = security::create_access_token(user.id, user.role, state.settings(), None)
        .map_err(|e| ApiError::internal(e, "Failed to create access token"))?;
    Ok(TokenResponse::bearer(token, UserResponse::from_db(user)))
}
