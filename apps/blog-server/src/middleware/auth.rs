//! Identity extraction from bearer tokens.

use std::future::{Ready, ready};
use std::sync::Arc;

use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};

use quill_core::ports::{AuthError, TokenService};

/// Where unauthenticated callers get sent.
pub const LOGIN_PATH: &str = "/api/auth/login";

/// The logged-in caller. Declaring this as a handler parameter makes the
/// endpoint require authentication.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub username: String,
}

/// Extraction failure: the caller is not logged in.
///
/// Write endpoints answer missing or bad credentials with a redirect to
/// the login entry point; the guarded operation never runs.
#[derive(Debug, thiserror::Error)]
#[error("login required: {0}")]
pub struct LoginRequired(pub AuthError);

impl actix_web::ResponseError for LoginRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((header::LOCATION, LOGIN_PATH))
            .finish()
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AuthError::InvalidToken("expected a Bearer token".to_string()))
}

fn authenticate(req: &HttpRequest) -> Result<Identity, AuthError> {
    let tokens = req
        .app_data::<web::Data<Arc<dyn TokenService>>>()
        .ok_or_else(|| {
            tracing::error!("TokenService missing from app data");
            AuthError::InvalidToken("server misconfigured".to_string())
        })?;

    let claims = tokens.validate_token(bearer_token(req)?)?;
    Ok(Identity {
        user_id: claims.user_id,
        username: claims.username,
    })
}

impl FromRequest for Identity {
    type Error = LoginRequired;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(LoginRequired))
    }
}

/// Identity extractor for endpoints that also serve anonymous callers.
pub struct OptionalIdentity(pub Option<Identity>);

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalIdentity(authenticate(req).ok())))
    }
}
