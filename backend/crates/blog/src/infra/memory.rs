//! In-memory repository
//!
//! Same visibility and ordering rules as the Postgres repository.

use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryBlogRepository {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: Arc::new(RwLock::new(posts)),
        }
    }

    async fn published_where(&self, now: DateTime<Utc>, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let mut found: Vec<Post> = self
            .posts
            .read()
            .await
            .iter()
            .filter(|p| p.is_published(now) && keep(p))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        found
    }
}

impl PostRepository for InMemoryBlogRepository {
    async fn list_published(&self, now: DateTime<Utc>) -> BlogResult<Vec<Post>> {
        Ok(self.published_where(now, |_| true).await)
    }

    async fn list_published_by_tag(&self, tag: &str, now: DateTime<Utc>) -> BlogResult<Vec<Post>> {
        Ok(self.published_where(now, |p| p.has_tag(tag)).await)
    }

    async fn find_published_by_slug(
        &self,
        slug: &str,
        now: DateTime<Utc>,
    ) -> BlogResult<Option<Post>> {
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .find(|p| p.slug == slug && p.is_published(now))
            .cloned())
    }

    async fn slugs_with_prefix(&self, base: &str) -> BlogResult<Vec<String>> {
        let prefix = format!("{base}-");
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .filter(|p| p.slug == base || p.slug.starts_with(&prefix))
            .map(|p| p.slug.clone())
            .collect())
    }

    async fn list_all(&self) -> BlogResult<Vec<Post>> {
        let mut posts = self.posts.read().await.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn publish_dates_from(&self, from: DateTime<Utc>) -> BlogResult<Vec<DateTime<Utc>>> {
        let mut dates: Vec<_> = self
            .posts
            .read()
            .await
            .iter()
            .filter_map(|p| p.published_at)
            .filter(|at| *at >= from)
            .collect();
        dates.sort();
        Ok(dates)
    }

    async fn create(&self, post: &Post) -> BlogResult<()> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.slug == post.slug) {
            return Err(BlogError::Internal(format!("duplicate slug {}", post.slug)));
        }
        posts.push(post.clone());
        Ok(())
    }
}
