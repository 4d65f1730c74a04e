//! Category listing handler.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use quill_core::domain::{Page, PostPreview};
use quill_shared::dto::PageQuery;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Serialize)]
struct CategorySummary {
    title: String,
    description: String,
    slug: String,
}

#[derive(Serialize)]
struct CategoryPageResponse {
    category: CategorySummary,
    posts: Page<PostPreview>,
}

/// GET /api/categories/{slug}
///
/// Unpublished categories are not resolvable at all; within a published
/// one, posts go through the usual visibility filter.
pub async fn posts_by_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let category = state
        .categories
        .find_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    let posts = state
        .posts
        .list_visible_by_category(category.id, state.clock.now(), query.page())
        .await?;

    Ok(HttpResponse::Ok().json(CategoryPageResponse {
        category: CategorySummary {
            title: category.title,
            description: category.description,
            slug: category.slug,
        },
        posts,
    }))
}
