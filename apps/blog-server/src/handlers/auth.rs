//! Registration and login handlers.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use validator::Validate;

use quill_core::domain::User;
use quill_core::ports::{PasswordService, TokenService};
use quill_shared::dto::{AuthResponse, LoginRequest, ProfileResponse, RegisterRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn issue_token(tokens: &Arc<dyn TokenService>, user: &User) -> AppResult<AuthResponse> {
    let access_token = tokens
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.expiration_seconds() as u64,
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenService>>,
    passwords: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    form.validate()?;

    if state.users.find_by_username(&form.username).await?.is_some() {
        return Err(AppError::Conflict("username already taken".to_string()));
    }
    if state.users.find_by_email(&form.email).await?.is_some() {
        return Err(AppError::Conflict("email already registered".to_string()));
    }

    let password_hash = passwords
        .hash(&form.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let user = state
        .users
        .insert(User::new(
            form.username,
            form.email,
            password_hash,
            form.first_name,
            form.last_name,
            state.clock.now(),
        ))
        .await?;
    tracing::info!(user.name = %user.username, "Account registered");

    Ok(HttpResponse::Created().json(issue_token(&tokens, &user)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenService>>,
    passwords: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();

    let user = state
        .users
        .find_by_username(&form.username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let password_ok = passwords
        .verify(&form.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !password_ok {
        return Err(AppError::Unauthorized);
    }

    Ok(HttpResponse::Ok().json(issue_token(&tokens, &user)?))
}

/// GET /api/auth/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("account no longer exists".to_string()))?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        id: user.id,
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
    }))
}
