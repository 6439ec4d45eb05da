//! User service for authentication and user management
//!
//! Password hashing and verification run on the blocking thread pool.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{UpdateUser, UserRecord, UserRepository};
use recipe_shared::types::{AuthTokens, UpdateProfileRequest, UserProfile};
use recipe_shared::validation;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user and issue a token pair
    pub async fn register(
        pool: &PgPool,
        jwt_service: &JwtService,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthTokens, ApiError> {
        let email = validation::normalize_email(email);
        validation::validate_email(&email).map_err(ApiError::Validation)?;
        validation::validate_password(password).map_err(ApiError::Validation)?;
        validation::validate_user_name(name).map_err(ApiError::Validation)?;

        if UserRepository::email_exists(pool, &email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = PasswordService::hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        // A concurrent registration can still win the insert after the check above
        let user = UserRepository::create(pool, &email, name.trim(), &password_hash)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::Conflict("Email already registered".to_string())
                } else {
                    ApiError::Internal(e)
                }
            })?;

        info!(user_id = %user.id, "User registered");

        Self::issue_tokens(jwt_service, user.id)
    }

    /// Login with email and password
    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<AuthTokens, ApiError> {
        let email = validation::normalize_email(email);
        let user = UserRepository::find_by_email(pool, &email)
            .await
            .map_err(ApiError::Internal)?
            .filter(|user| user.is_active)
            .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

        let valid = PasswordService::verify_async(password.to_string(), user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        Self::issue_tokens(jwt_service, user.id)
    }

    /// Exchange a refresh token for a fresh token pair
    pub async fn refresh_token(
        pool: &PgPool,
        jwt_service: &JwtService,
        refresh_token: &str,
    ) -> Result<AuthTokens, ApiError> {
        let claims = jwt_service
            .validate_refresh_token(refresh_token)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        // The account may have been removed or deactivated since the token was issued
        UserRepository::find_by_id(pool, claims.sub)
            .await
            .map_err(ApiError::Internal)?
            .filter(|user| user.is_active)
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        Self::issue_tokens(jwt_service, claims.sub)
    }

    /// Get user profile
    pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<UserProfile, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(Self::profile(user))
    }

    /// Update the caller's name and/or password
    pub async fn update_profile(
        pool: &PgPool,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<UserProfile, ApiError> {
        if let Some(name) = &req.name {
            validation::validate_user_name(name).map_err(ApiError::Validation)?;
        }

        let password_hash = match req.password {
            Some(password) => {
                validation::validate_password(&password).map_err(ApiError::Validation)?;
                Some(
                    PasswordService::hash_async(password)
                        .await
                        .map_err(ApiError::Internal)?,
                )
            }
            None => None,
        };

        let changes = UpdateUser {
            name: req.name.map(|n| n.trim().to_string()),
            password_hash,
        };

        let user = UserRepository::update(pool, user_id, changes)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(user_id = %user.id, "User profile updated");

        Ok(Self::profile(user))
    }

    fn issue_tokens(jwt_service: &JwtService, user_id: Uuid) -> Result<AuthTokens, ApiError> {
        let access_token = jwt_service
            .generate_access_token(user_id)
            .map_err(ApiError::Internal)?;
        let refresh_token = jwt_service
            .generate_refresh_token(user_id)
            .map_err(ApiError::Internal)?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_service.access_token_expiry_secs(),
        })
    }

    fn profile(user: UserRecord) -> UserProfile {
        UserProfile {
            id: user.id.to_string(),
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

/// Whether a repository error is Postgres rejecting a duplicate key
fn is_unique_violation(err: &anyhow::Error) -> bool {
    match err.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db)) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}
