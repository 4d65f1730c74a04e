use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog entry owned by its author, usually filed under a
/// category and optionally tagged with a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub title: String,
    pub text: String,
    /// Publish timestamp. A future date keeps the post hidden from the
    /// public even when `is_published` is set.
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with a generated ID. `now` comes from the caller's
    /// clock and only feeds `created_at`; `pub_date` is author-chosen.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        author_id: Uuid,
        category_id: Option<Uuid>,
        location_id: Option<Uuid>,
        title: String,
        text: String,
        pub_date: DateTime<Utc>,
        is_published: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            category_id,
            location_id,
            title,
            text,
            pub_date,
            is_published,
            created_at: now,
        }
    }

    /// Whether this post is visible to someone who is not its author.
    ///
    /// `category_published` is the `is_published` flag of the post's
    /// category; a post without a category never reaches the public.
    pub fn is_publicly_visible(&self, category_published: bool, as_of: DateTime<Utc>) -> bool {
        self.is_published && category_published && self.pub_date <= as_of
    }

    /// Whether this post is visible to the given viewer. Authors see their
    /// own posts regardless of publication state.
    pub fn visible_to(
        &self,
        viewer: Option<Uuid>,
        category_published: bool,
        as_of: DateTime<Utc>,
    ) -> bool {
        viewer == Some(self.author_id) || self.is_publicly_visible(category_published, as_of)
    }
}

/// A post row shaped for listings: the post's own fields plus the joined
/// author/category/location display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPreview {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub author_username: String,
    pub category_title: Option<String>,
    pub category_slug: Option<String>,
    pub location_name: Option<String>,
}
