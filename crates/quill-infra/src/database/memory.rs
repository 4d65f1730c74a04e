//! In-memory repositories - used when no database is configured, and by
//! the server's endpoint tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{
    Category, Comment, CommentWithAuthor, Location, PAGE_SIZE, Page, Post, PostPreview, User,
};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, PostRepository, UserRepository,
};

/// Shared storage behind the in-memory repositories.
///
/// Note: data is lost on process restart.
#[derive(Default)]
pub struct InMemoryDb {
    users: RwLock<HashMap<Uuid, User>>,
    categories: RwLock<HashMap<Uuid, Category>>,
    locations: RwLock<HashMap<Uuid, Location>>,
    posts: RwLock<HashMap<Uuid, Post>>,
    comments: RwLock<HashMap<Uuid, Comment>>,
}

impl InMemoryDb {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Locations have no repository port; seed them directly.
    pub async fn insert_location(&self, location: Location) {
        self.locations.write().await.insert(location.id, location);
    }

    async fn category_is_published(&self, category_id: Option<Uuid>) -> bool {
        match category_id {
            Some(id) => self
                .categories
                .read()
                .await
                .get(&id)
                .map(|c| c.is_published)
                .unwrap_or(false),
            None => false,
        }
    }

    async fn preview(&self, post: &Post) -> PostPreview {
        let author_username = self
            .users
            .read()
            .await
            .get(&post.author_id)
            .map(|u| u.username.clone())
            .unwrap_or_default();

        let (category_title, category_slug) = match post.category_id {
            Some(id) => self
                .categories
                .read()
                .await
                .get(&id)
                .map(|c| (Some(c.title.clone()), Some(c.slug.clone())))
                .unwrap_or((None, None)),
            None => (None, None),
        };

        let location_name = match post.location_id {
            Some(id) => self.locations.read().await.get(&id).map(|l| l.name.clone()),
            None => None,
        };

        PostPreview {
            id: post.id,
            title: post.title.clone(),
            text: post.text.clone(),
            pub_date: post.pub_date,
            is_published: post.is_published,
            author_username,
            category_title,
            category_slug,
            location_name,
        }
    }

    /// Sort newest publish date first, slice out the requested page, and
    /// join the display fields.
    async fn preview_page(&self, mut posts: Vec<Post>, page: u64) -> Page<PostPreview> {
        posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));

        let total_items = posts.len() as u64;
        let start = (page.saturating_sub(1) * PAGE_SIZE) as usize;

        let mut items = Vec::new();
        for post in posts.into_iter().skip(start).take(PAGE_SIZE as usize) {
            items.push(self.preview(&post).await);
        }

        Page::new(items, page, total_items)
    }

    async fn visible_posts(&self, as_of: DateTime<Utc>) -> Vec<Post> {
        let posts: Vec<Post> = self.posts.read().await.values().cloned().collect();

        let mut visible = Vec::new();
        for post in posts {
            let category_published = self.category_is_published(post.category_id).await;
            if post.is_publicly_visible(category_published, as_of) {
                visible.push(post);
            }
        }
        visible
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    db: Arc<InMemoryDb>,
}

impl InMemoryUserRepository {
    pub fn new(db: Arc<InMemoryDb>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.db.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.db.users.write().await;
        if users
            .values()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(RepoError::Constraint(
                "username or email already taken".to_string(),
            ));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.db.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        if users
            .values()
            .any(|u| u.id != user.id && (u.username == user.username || u.email == user.email))
        {
            return Err(RepoError::Constraint(
                "username or email already taken".to_string(),
            ));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.db
            .users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .db
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .db
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

/// In-memory category repository.
pub struct InMemoryCategoryRepository {
    db: Arc<InMemoryDb>,
}

impl InMemoryCategoryRepository {
    pub fn new(db: Arc<InMemoryDb>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BaseRepository<Category, Uuid> for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        Ok(self.db.categories.read().await.get(&id).cloned())
    }

    async fn insert(&self, category: Category) -> Result<Category, RepoError> {
        let mut categories = self.db.categories.write().await;
        if categories.values().any(|c| c.slug == category.slug) {
            return Err(RepoError::Constraint("slug already taken".to_string()));
        }
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(&self, category: Category) -> Result<Category, RepoError> {
        let mut categories = self.db.categories.write().await;
        if !categories.contains_key(&category.id) {
            return Err(RepoError::NotFound);
        }
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.db
            .categories
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        Ok(self
            .db
            .categories
            .read()
            .await
            .values()
            .find(|c| c.slug == slug && c.is_published)
            .cloned())
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    db: Arc<InMemoryDb>,
}

impl InMemoryPostRepository {
    pub fn new(db: Arc<InMemoryDb>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.db.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.db.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.db.posts.write().await;
        if !posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        if self.db.posts.write().await.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        // Mirror the database's ON DELETE CASCADE for comments
        self.db
            .comments
            .write()
            .await
            .retain(|_, c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_visible_by_id(
        &self,
        id: Uuid,
        as_of: DateTime<Utc>,
    ) -> Result<Option<Post>, RepoError> {
        let post = self.db.posts.read().await.get(&id).cloned();

        match post {
            Some(post) => {
                let category_published = self.db.category_is_published(post.category_id).await;
                Ok(post
                    .is_publicly_visible(category_published, as_of)
                    .then_some(post))
            }
            None => Ok(None),
        }
    }

    async fn list_visible(
        &self,
        as_of: DateTime<Utc>,
        page: u64,
    ) -> Result<Page<PostPreview>, RepoError> {
        let visible = self.db.visible_posts(as_of).await;
        Ok(self.db.preview_page(visible, page).await)
    }

    async fn list_visible_by_category(
        &self,
        category_id: Uuid,
        as_of: DateTime<Utc>,
        page: u64,
    ) -> Result<Page<PostPreview>, RepoError> {
        let mut visible = self.db.visible_posts(as_of).await;
        visible.retain(|p| p.category_id == Some(category_id));
        Ok(self.db.preview_page(visible, page).await)
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        page: u64,
    ) -> Result<Page<PostPreview>, RepoError> {
        let posts: Vec<Post> = self
            .db
            .posts
            .read()
            .await
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();

        Ok(self.db.preview_page(posts, page).await)
    }

    async fn list_visible_by_author(
        &self,
        author_id: Uuid,
        as_of: DateTime<Utc>,
        page: u64,
    ) -> Result<Page<PostPreview>, RepoError> {
        let mut visible = self.db.visible_posts(as_of).await;
        visible.retain(|p| p.author_id == author_id);
        Ok(self.db.preview_page(visible, page).await)
    }
}

/// In-memory comment repository.
pub struct InMemoryCommentRepository {
    db: Arc<InMemoryDb>,
}

impl InMemoryCommentRepository {
    pub fn new(db: Arc<InMemoryDb>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.db.comments.read().await.get(&id).cloned())
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        self.db
            .comments
            .write()
            .await
            .insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut comments = self.db.comments.write().await;
        if !comments.contains_key(&comment.id) {
            return Err(RepoError::NotFound);
        }
        comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.db
            .comments
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>, RepoError> {
        let mut comments: Vec<Comment> = self
            .db
            .comments
            .read()
            .await
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let users = self.db.users.read().await;
        Ok(comments
            .into_iter()
            .map(|c| CommentWithAuthor {
                id: c.id,
                post_id: c.post_id,
                text: c.text,
                created_at: c.created_at,
                author_username: users
                    .get(&c.author_id)
                    .map(|u| u.username.clone())
                    .unwrap_or_default(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn base_time() -> DateTime<Utc> {
        "2025-06-01T12:00:00Z".parse().unwrap()
    }

    struct Fixture {
        db: Arc<InMemoryDb>,
        posts: InMemoryPostRepository,
        alice: User,
        news: Category,
    }

    async fn fixture() -> Fixture {
        let now = base_time();
        let db = InMemoryDb::new();

        let alice = User::new(
            "alice".into(),
            "alice@example.com".into(),
            "hash".into(),
            String::new(),
            String::new(),
            now,
        );
        InMemoryUserRepository::new(db.clone())
            .insert(alice.clone())
            .await
            .unwrap();

        let news = Category::new("News".into(), "All news".into(), "news".into(), true, now);
        InMemoryCategoryRepository::new(db.clone())
            .insert(news.clone())
            .await
            .unwrap();

        Fixture {
            posts: InMemoryPostRepository::new(db.clone()),
            db,
            alice,
            news,
        }
    }

    fn make_post(
        author: &User,
        category: Option<Uuid>,
        pub_date: DateTime<Utc>,
        is_published: bool,
    ) -> Post {
        Post::new(
            author.id,
            category,
            None,
            "title".into(),
            "text".into(),
            pub_date,
            is_published,
            base_time(),
        )
    }

    #[tokio::test]
    async fn index_membership_follows_visibility_rule() {
        let fx = fixture().await;
        let now = base_time();

        let past = make_post(&fx.alice, Some(fx.news.id), now - TimeDelta::days(1), true);
        let future = make_post(&fx.alice, Some(fx.news.id), now + TimeDelta::days(1), true);
        let draft = make_post(&fx.alice, Some(fx.news.id), now - TimeDelta::days(2), false);
        let uncategorized = make_post(&fx.alice, None, now - TimeDelta::days(3), true);
        for p in [&past, &future, &draft, &uncategorized] {
            fx.posts.insert(p.clone()).await.unwrap();
        }

        let page = fx.posts.list_visible(now, 1).await.unwrap();

        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].id, past.id);
        assert_eq!(page.items[0].author_username, "alice");
        assert_eq!(page.items[0].category_slug.as_deref(), Some("news"));
    }

    #[tokio::test]
    async fn previews_join_the_location_name() {
        let fx = fixture().await;
        let now = base_time();

        let cafe = Location::new("The cafe".into(), now);
        fx.db.insert_location(cafe.clone()).await;

        let mut post = make_post(&fx.alice, Some(fx.news.id), now - TimeDelta::days(1), true);
        post.location_id = Some(cafe.id);
        fx.posts.insert(post).await.unwrap();

        let page = fx.posts.list_visible(now, 1).await.unwrap();

        assert_eq!(page.items[0].location_name.as_deref(), Some("The cafe"));
    }

    #[tokio::test]
    async fn hidden_category_hides_its_posts() {
        let fx = fixture().await;
        let now = base_time();

        let secret = Category::new(
            "Secret".into(),
            String::new(),
            "secret".into(),
            false,
            now,
        );
        InMemoryCategoryRepository::new(fx.db.clone())
            .insert(secret.clone())
            .await
            .unwrap();
        let post = make_post(&fx.alice, Some(secret.id), now - TimeDelta::days(1), true);
        fx.posts.insert(post.clone()).await.unwrap();

        assert_eq!(fx.posts.list_visible(now, 1).await.unwrap().total_items, 0);
        assert!(
            fx.posts
                .find_visible_by_id(post.id, now)
                .await
                .unwrap()
                .is_none()
        );
        // The author-facing lookup still resolves it
        assert!(fx.posts.find_by_id(post.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn listing_orders_newest_first_and_paginates() {
        let fx = fixture().await;
        let now = base_time();

        for i in 0..15 {
            let post = make_post(
                &fx.alice,
                Some(fx.news.id),
                now - TimeDelta::hours(i + 1),
                true,
            );
            fx.posts.insert(post).await.unwrap();
        }

        let first = fx.posts.list_visible(now, 1).await.unwrap();
        let second = fx.posts.list_visible(now, 2).await.unwrap();

        assert_eq!(first.items.len(), 10);
        assert_eq!(second.items.len(), 5);
        assert_eq!(first.total_items, 15);
        assert_eq!(first.total_pages, 2);
        assert!(
            first
                .items
                .windows(2)
                .all(|w| w[0].pub_date >= w[1].pub_date)
        );
        // Page two continues where page one left off
        assert!(first.items.last().unwrap().pub_date >= second.items[0].pub_date);
    }

    #[tokio::test]
    async fn author_listing_includes_drafts_only_for_author_view() {
        let fx = fixture().await;
        let now = base_time();

        let published = make_post(&fx.alice, Some(fx.news.id), now - TimeDelta::days(1), true);
        let draft = make_post(&fx.alice, Some(fx.news.id), now - TimeDelta::days(1), false);
        fx.posts.insert(published.clone()).await.unwrap();
        fx.posts.insert(draft.clone()).await.unwrap();

        let own = fx.posts.list_by_author(fx.alice.id, 1).await.unwrap();
        let public = fx
            .posts
            .list_visible_by_author(fx.alice.id, now, 1)
            .await
            .unwrap();

        assert_eq!(own.total_items, 2);
        assert_eq!(public.total_items, 1);
        assert_eq!(public.items[0].id, published.id);
    }

    #[tokio::test]
    async fn comments_come_back_oldest_first_with_authors() {
        let fx = fixture().await;
        let now = base_time();
        let comments = InMemoryCommentRepository::new(fx.db.clone());

        let post = make_post(&fx.alice, Some(fx.news.id), now - TimeDelta::days(1), true);
        fx.posts.insert(post.clone()).await.unwrap();

        let late = Comment::new(fx.alice.id, post.id, "second".into(), now);
        let early = Comment::new(fx.alice.id, post.id, "first".into(), now - TimeDelta::hours(1));
        comments.insert(late).await.unwrap();
        comments.insert(early).await.unwrap();

        let listed = comments.list_for_post(post.id).await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].text, "first");
        assert_eq!(listed[1].text, "second");
        assert_eq!(listed[0].author_username, "alice");
    }

    #[tokio::test]
    async fn deleting_a_post_removes_its_comments() {
        let fx = fixture().await;
        let now = base_time();
        let comments = InMemoryCommentRepository::new(fx.db.clone());

        let post = make_post(&fx.alice, Some(fx.news.id), now, true);
        fx.posts.insert(post.clone()).await.unwrap();
        comments
            .insert(Comment::new(fx.alice.id, post.id, "hi".into(), now))
            .await
            .unwrap();

        fx.posts.delete(post.id).await.unwrap();

        assert!(comments.list_for_post(post.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_usernames_are_rejected() {
        let fx = fixture().await;
        let users = InMemoryUserRepository::new(fx.db.clone());

        let dup = User::new(
            "alice".into(),
            "other@example.com".into(),
            "hash".into(),
            String::new(),
            String::new(),
            base_time(),
        );

        assert!(matches!(
            users.insert(dup).await,
            Err(RepoError::Constraint(_))
        ));
    }
}
