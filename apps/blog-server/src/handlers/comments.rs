//! Comment handlers: create under a post, update, delete.

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use quill_core::domain::Comment;
use quill_shared::dto::CommentForm;

use crate::handlers::{post_detail_path, see_other};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/posts/{post_id}/comments
///
/// Any existing post accepts comments; there is no visibility check here.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let form = body.into_inner();
    form.validate()?;

    let comment = Comment::new(identity.user_id, post.id, form.text, state.clock.now());
    state.comments.insert(comment).await?;

    Ok(see_other(&post_detail_path(post_id)))
}

/// PUT /api/comments/{comment_id}
///
/// Non-authors are redirected to the parent post with nothing applied.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let comment_id = path.into_inner();

    let mut comment = state
        .comments
        .find_by_id(comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;
    let detail = post_detail_path(comment.post_id);

    if comment.author_id != identity.user_id {
        return Ok(see_other(&detail));
    }

    let form = body.into_inner();
    form.validate()?;

    comment.text = form.text;
    state.comments.update(comment).await?;

    Ok(see_other(&detail))
}

/// POST /api/comments/{comment_id}/delete
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment_id = path.into_inner();

    let comment = state
        .comments
        .find_by_id(comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;
    let detail = post_detail_path(comment.post_id);

    if comment.author_id == identity.user_id {
        state.comments.delete(comment_id).await?;
    }

    Ok(see_other(&detail))
}
