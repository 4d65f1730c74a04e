//! PostgreSQL repository implementations.
//!
//! The public visibility rule lives in [`visible_condition`]; every query
//! that serves non-owner viewers composes it, so the filter cannot drift
//! between the index, category, profile, and detail paths.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ColumnTrait, Condition, DbConn, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use quill_core::domain::{Category, CommentWithAuthor, PAGE_SIZE, Page, Post, PostPreview, User};
use quill_core::error::RepoError;
use quill_core::ports::{CategoryRepository, CommentRepository, PostRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::entity::{category, location};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<category::Entity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// The public visibility predicate: post published, category published,
/// publish date not in the future. Posts without a category fail the
/// category check because the joined columns are NULL.
fn visible_condition(as_of: DateTime<Utc>) -> Condition {
    Condition::all()
        .add(post::Column::IsPublished.eq(true))
        .add(post::Column::PubDate.lte(as_of))
        .add(category::Column::IsPublished.eq(true))
}

/// Base select for listing pages: posts with author, category, and location
/// display fields joined in, newest publish date first.
fn preview_select() -> Select<PostEntity> {
    PostEntity::find()
        .join(JoinType::InnerJoin, post::Relation::Author.def())
        .join(JoinType::LeftJoin, post::Relation::Category.def())
        .join(JoinType::LeftJoin, post::Relation::Location.def())
        .select_only()
        .columns([
            post::Column::Id,
            post::Column::Title,
            post::Column::Text,
            post::Column::PubDate,
            post::Column::IsPublished,
        ])
        .column_as(user::Column::Username, "author_username")
        .column_as(category::Column::Title, "category_title")
        .column_as(category::Column::Slug, "category_slug")
        .column_as(location::Column::Name, "location_name")
        .order_by_desc(post::Column::PubDate)
}

#[derive(Debug, FromQueryResult)]
struct PostPreviewRow {
    id: Uuid,
    title: String,
    text: String,
    pub_date: DateTimeWithTimeZone,
    is_published: bool,
    author_username: String,
    category_title: Option<String>,
    category_slug: Option<String>,
    location_name: Option<String>,
}

impl From<PostPreviewRow> for PostPreview {
    fn from(row: PostPreviewRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            text: row.text,
            pub_date: row.pub_date.into(),
            is_published: row.is_published,
            author_username: row.author_username,
            category_title: row.category_title,
            category_slug: row.category_slug,
            location_name: row.location_name,
        }
    }
}

async fn fetch_preview_page(
    db: &DbConn,
    select: Select<PostEntity>,
    page: u64,
) -> Result<Page<PostPreview>, RepoError> {
    let paginator = select
        .into_model::<PostPreviewRow>()
        .paginate(db, PAGE_SIZE);

    let total_items = paginator
        .num_items()
        .await
        .map_err(|e| RepoError::Query(e.to_string()))?;
    let rows = paginator
        .fetch_page(page.saturating_sub(1))
        .await
        .map_err(|e| RepoError::Query(e.to_string()))?;

    Ok(Page::new(
        rows.into_iter().map(Into::into).collect(),
        page,
        total_items,
    ))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user.name = %username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask the local part so addresses stay out of the logs
        let masked = match email.split_once('@') {
            Some((local, domain)) => {
                format!("{}***@{}", local.chars().next().unwrap_or('*'), domain)
            }
            None => "***".to_string(),
        };
        tracing::debug!(user.email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = category::Entity::find()
            .filter(category::Column::Slug.eq(slug))
            .filter(category::Column::IsPublished.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_visible_by_id(
        &self,
        id: Uuid,
        as_of: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .join(JoinType::LeftJoin, post::Relation::Category.def())
            .filter(visible_condition(as_of))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn list_visible(
        &self,
        as_of: DateTime<Utc>,
        page: u64,
    ) -> Result<Page<PostPreview>, RepoError> {
        let select = preview_select().filter(visible_condition(as_of));

        fetch_preview_page(&self.db, select, page).await
    }

    async fn list_visible_by_category(
        &self,
        category_id: Uuid,
        as_of: DateTime<Utc>,
        page: u64,
    ) -> Result<Page<PostPreview>, RepoError> {
        let select = preview_select()
            .filter(post::Column::CategoryId.eq(category_id))
            .filter(visible_condition(as_of));

        fetch_preview_page(&self.db, select, page).await
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        page: u64,
    ) -> Result<Page<PostPreview>, RepoError> {
        let select = preview_select().filter(post::Column::AuthorId.eq(author_id));

        fetch_preview_page(&self.db, select, page).await
    }

    async fn list_visible_by_author(
        &self,
        author_id: Uuid,
        as_of: DateTime<Utc>,
        page: u64,
    ) -> Result<Page<PostPreview>, RepoError> {
        let select = preview_select()
            .filter(post::Column::AuthorId.eq(author_id))
            .filter(visible_condition(as_of));

        fetch_preview_page(&self.db, select, page).await
    }
}

#[derive(Debug, FromQueryResult)]
struct CommentRow {
    id: Uuid,
    post_id: Uuid,
    text: String,
    created_at: DateTimeWithTimeZone,
    author_username: String,
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>, RepoError> {
        let rows = CommentEntity::find()
            .join(JoinType::InnerJoin, comment::Relation::Author.def())
            .select_only()
            .columns([
                comment::Column::Id,
                comment::Column::PostId,
                comment::Column::Text,
                comment::Column::CreatedAt,
            ])
            .column_as(user::Column::Username, "author_username")
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .into_model::<CommentRow>()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| CommentWithAuthor {
                id: row.id,
                post_id: row.post_id,
                text: row.text,
                created_at: row.created_at.into(),
                author_username: row.author_username,
            })
            .collect())
    }
}
