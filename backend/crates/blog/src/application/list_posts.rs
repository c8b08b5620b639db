//! List Posts Use Case

use crate::domain::entities::PostSummary;
use crate::domain::repository::PostRepository;
use crate::error::BlogResult;
use chrono::Utc;
use std::sync::Arc;

/// List Posts Use Case
pub struct ListPostsUseCase<P>
where
    P: PostRepository,
{
    posts: Arc<P>,
}

impl<P> ListPostsUseCase<P>
where
    P: PostRepository,
{
    pub fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }

    /// Published posts, newest first, optionally only those with `tag`
    pub async fn execute(&self, tag: Option<&str>) -> BlogResult<Vec<PostSummary>> {
        let now = Utc::now();
        let tag = tag.map(str::trim).filter(|t| !t.is_empty());

        let posts = match tag {
            Some(tag) => self.posts.list_published_by_tag(tag, now).await?,
            None => self.posts.list_published(now).await?,
        };

        Ok(posts.iter().map(PostSummary::from).collect())
    }
}
