//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use pulse_core::DomainError;
use pulse_core::RepoError;
use pulse_core::domain::User;
use pulse_core::ports::{AuthError, PasswordService, TokenService};
use pulse_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn require_credentials(username: &str, password: &str) -> AppResult<()> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }
    Ok(())
}

fn issue_token(token_service: &dyn TokenService, user: &User) -> AppResult<AuthResponse> {
    let token = token_service.generate_token(user.id, &user.username)?;

    Ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds().max(0) as u64,
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    require_credentials(&req.username, &req.password)?;

    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(DomainError::Duplicate("Username already taken".to_string()).into());
    }

    let password_hash = password_service.hash(&req.password)?;

    // The unique index settles concurrent registrations of the same name.
    let user = state
        .users
        .create(User::new(req.username, password_hash))
        .await
        .map_err(|e| match e {
            RepoError::Constraint(_) => AppError::Conflict("Username already taken".to_string()),
            other => other.into(),
        })?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    Ok(HttpResponse::Created().json(issue_token(token_service.get_ref().as_ref(), &user)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    require_credentials(&req.username, &req.password)?;

    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !password_service.verify(&req.password, &user.password_hash)? {
        tracing::debug!(username = %req.username, "Login rejected");
        return Err(AuthError::InvalidCredentials.into());
    }

    Ok(HttpResponse::Ok().json(issue_token(token_service.get_ref().as_ref(), &user)?))
}

/// GET /api/auth/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| {
            tracing::debug!(user_id = %identity.user_id, "Token for unknown account");
            AppError::Unauthorized("Account no longer exists".to_string())
        })?;

    Ok(HttpResponse::Ok().json(UserResponse {
        id: user.id,
        username: user.username,
    }))
}
