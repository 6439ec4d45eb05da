//! Authentication routes
//!
//! Provides endpoints for user registration, login, token refresh
//! and management of the current user's profile.

use super::extract::ApiJson;
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use recipe_shared::types::{
    AuthTokens, LoginRequest, RegisterRequest, UpdateProfileRequest, UserProfile,
};
use serde::Deserialize;

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .route("/me", get(get_profile).patch(update_profile))
}

/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthTokens>), ApiError> {
    let tokens =
        UserService::register(&state.db, state.jwt(), &req.email, &req.password, &req.name).await?;
    Ok((StatusCode::CREATED, Json(tokens)))
}

/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<AuthTokens>> {
    let tokens = UserService::login(&state.db, state.jwt(), &req.email, &req.password).await?;
    Ok(Json(tokens))
}

/// Refresh token request
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// POST /api/v1/auth/refresh
async fn refresh_token(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RefreshTokenRequest>,
) -> ApiResult<Json<AuthTokens>> {
    let tokens = UserService::refresh_token(&state.db, state.jwt(), &req.refresh_token).await?;
    Ok(Json(tokens))
}

/// GET /api/v1/auth/me
async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<UserProfile>> {
    let profile = UserService::get_profile(&state.db, auth_user.user_id).await?;
    Ok(Json(profile))
}

/// PATCH /api/v1/auth/me
async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserProfile>> {
    let profile = UserService::update_profile(&state.db, auth_user.user_id, req).await?;
    Ok(Json(profile))
}
