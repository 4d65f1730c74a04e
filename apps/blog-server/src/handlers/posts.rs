//! Post handlers: index listing, detail, create, update, delete.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use quill_core::domain::{CommentWithAuthor, Post};
use quill_shared::dto::{CommentForm, PageQuery, PostForm};

use crate::handlers::{post_detail_path, profile_path, see_other};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts
///
/// The public index: visible posts only, newest first, fixed page size.
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state
        .posts
        .list_visible(state.clock.now(), query.page())
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

#[derive(Serialize)]
struct PostDetailResponse {
    post: Post,
    author_username: String,
    comments: Vec<CommentWithAuthor>,
    /// Empty submission form served alongside the comments.
    comment_form: CommentForm,
}

/// GET /api/posts/{post_id}
///
/// Authors see their own posts unconditionally; everyone else goes through
/// the visibility filter. A post that exists but is invisible answers
/// exactly like one that does not exist.
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    viewer: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let viewer_id = viewer.0.as_ref().map(|v| v.user_id);

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let post = if Some(post.author_id) == viewer_id {
        post
    } else {
        state
            .posts
            .find_visible_by_id(post_id, state.clock.now())
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?
    };

    let author_username = state
        .users
        .find_by_id(post.author_id)
        .await?
        .map(|u| u.username)
        .unwrap_or_default();
    let comments = state.comments.list_for_post(post_id).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post,
        author_username,
        comments,
        comment_form: CommentForm::default(),
    }))
}

/// POST /api/posts
///
/// The author is always the requester; nothing in the payload can override
/// it.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    form.validate()?;

    let post = Post::new(
        identity.user_id,
        form.category_id,
        form.location_id,
        form.title,
        form.text,
        form.pub_date,
        form.is_published,
        state.clock.now(),
    );
    let post = state.posts.insert(post).await?;
    tracing::info!(post.id = %post.id, "Post created");

    Ok(see_other(&profile_path(&identity.username)))
}

/// PUT /api/posts/{post_id}
///
/// Non-authors are bounced back to the detail page with nothing applied.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let mut post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if post.author_id != identity.user_id {
        return Ok(see_other(&post_detail_path(post_id)));
    }

    let form = body.into_inner();
    form.validate()?;

    post.title = form.title;
    post.text = form.text;
    post.pub_date = form.pub_date;
    post.is_published = form.is_published;
    post.category_id = form.category_id;
    post.location_id = form.location_id;
    state.posts.update(post).await?;

    Ok(see_other(&post_detail_path(post_id)))
}

/// POST /api/posts/{post_id}/delete
///
/// Deletion happens only for the author, but the redirect target is the
/// index either way; callers cannot tell a denial from a success.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if post.author_id == identity.user_id {
        state.posts.delete(post_id).await?;
        tracing::info!(post.id = %post_id, "Post deleted");
    }

    Ok(see_other("/api/posts"))
}
