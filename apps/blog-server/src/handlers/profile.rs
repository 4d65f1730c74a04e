//! Profile handlers: public view and self-edit.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use validator::Validate;

use quill_core::domain::{Page, PostPreview, User};
use quill_shared::dto::{PageQuery, ProfileForm, ProfileResponse};

use crate::handlers::{profile_path, see_other};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Serialize)]
struct ProfilePageResponse {
    profile: ProfileResponse,
    posts: Page<PostPreview>,
}

fn to_profile(user: User) -> ProfileResponse {
    ProfileResponse {
        id: user.id,
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
    }
}

/// GET /api/profile/{username}
///
/// Owners get their full post history, drafts and future posts included;
/// everyone else gets the publicly visible subset.
pub async fn view(
    state: web::Data<AppState>,
    path: web::Path<String>,
    viewer: OptionalIdentity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();

    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    let is_self = viewer.0.as_ref().is_some_and(|v| v.user_id == user.id);
    let posts = if is_self {
        state.posts.list_by_author(user.id, query.page()).await?
    } else {
        state
            .posts
            .list_visible_by_author(user.id, state.clock.now(), query.page())
            .await?
    };

    Ok(HttpResponse::Ok().json(ProfilePageResponse {
        profile: to_profile(user),
        posts,
    }))
}

/// PUT /api/profile/edit
///
/// Always targets the requester's own account; there is no path for
/// editing someone else through here.
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ProfileForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    form.validate()?;

    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account no longer exists".to_string()))?;

    user.username = form.username;
    user.first_name = form.first_name;
    user.last_name = form.last_name;
    user.email = form.email;
    user.updated_at = state.clock.now();
    let user = state.users.update(user).await?;
    tracing::info!(user.name = %user.username, "Profile updated");

    Ok(see_other(&profile_path(&user.username)))
}
