//! Repository Traits

use chrono::{DateTime, Utc};

use crate::domain::entities::Post;
use crate::error::BlogResult;

/// Post repository trait
///
/// "Published" always means `published_at <= now` for the `now` passed in.
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Published posts, newest first
    async fn list_published(&self, now: DateTime<Utc>) -> BlogResult<Vec<Post>>;

    /// Published posts carrying `tag` (case-insensitive), newest first
    async fn list_published_by_tag(&self, tag: &str, now: DateTime<Utc>) -> BlogResult<Vec<Post>>;

    async fn find_published_by_slug(
        &self,
        slug: &str,
        now: DateTime<Utc>,
    ) -> BlogResult<Option<Post>>;

    /// Slugs of posts in any state equal to `base` or of the form `base-*`
    async fn slugs_with_prefix(&self, base: &str) -> BlogResult<Vec<String>>;

    /// Every post including drafts and scheduled ones
    async fn list_all(&self) -> BlogResult<Vec<Post>>;

    /// Publish dates at or after `from`
    async fn publish_dates_from(&self, from: DateTime<Utc>) -> BlogResult<Vec<DateTime<Utc>>>;

    async fn create(&self, post: &Post) -> BlogResult<()>;
}
