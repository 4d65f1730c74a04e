use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Comment, CommentWithAuthor, Page, Post, PostPreview, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Persist changes to an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Category repository. Categories are managed out of band; the application
/// only resolves them for listing pages.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    /// Resolve a category by slug, restricted to published categories.
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;
}

/// Post repository.
///
/// Every `*visible*` method applies the public visibility rule relative to
/// the supplied `as_of` instant: the post and its category are published and
/// the publish date is not in the future. Listing methods order by
/// descending publish date and return fixed-size pages.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Resolve a post by ID only if it is publicly visible at `as_of`.
    async fn find_visible_by_id(
        &self,
        id: Uuid,
        as_of: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError>;

    /// All publicly visible posts (the index listing).
    async fn list_visible(
        &self,
        as_of: DateTime<Utc>,
        page: u64,
    ) -> Result<Page<PostPreview>, RepoError>;

    /// Publicly visible posts within one category.
    async fn list_visible_by_category(
        &self,
        category_id: Uuid,
        as_of: DateTime<Utc>,
        page: u64,
    ) -> Result<Page<PostPreview>, RepoError>;

    /// Every post by the author, published or not. Reserved for the
    /// author's own profile page.
    async fn list_by_author(
        &self,
        author_id: Uuid,
        page: u64,
    ) -> Result<Page<PostPreview>, RepoError>;

    /// The publicly visible subset of an author's posts.
    async fn list_visible_by_author(
        &self,
        author_id: Uuid,
        as_of: DateTime<Utc>,
        page: u64,
    ) -> Result<Page<PostPreview>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments under a post, oldest first, with author usernames joined.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>, RepoError>;
}
