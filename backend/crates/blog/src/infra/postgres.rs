//! PostgreSQL Repository Implementation

use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::error::BlogResult;
use chrono::{DateTime, Utc};
use kernel::id::PostId;
use sqlx::PgPool;
use uuid::Uuid;

const POST_COLUMNS: &str = r#"
    post_id,
    title,
    slug,
    excerpt,
    content_html,
    tags,
    hero_image_url,
    related_tools,
    published_at,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed post repository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PostRepository for PgBlogRepository {
    async fn list_published(&self, now: DateTime<Utc>) -> BlogResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE published_at <= $1
            ORDER BY published_at DESC
            "#
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn list_published_by_tag(&self, tag: &str, now: DateTime<Utc>) -> BlogResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE published_at <= $1
              AND EXISTS (SELECT 1 FROM unnest(tags) AS t WHERE lower(t) = lower($2))
            ORDER BY published_at DESC
            "#
        ))
        .bind(now)
        .bind(tag)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(tag = %tag, results = rows.len(), "Posts by tag");

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn find_published_by_slug(
        &self,
        slug: &str,
        now: DateTime<Utc>,
    ) -> BlogResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE slug = $1 AND published_at <= $2"
        ))
        .bind(slug)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn slugs_with_prefix(&self, base: &str) -> BlogResult<Vec<String>> {
        // Generated slugs hold only [a-z0-9-], so no LIKE escaping is needed
        let slugs: Vec<String> =
            sqlx::query_scalar("SELECT slug FROM posts WHERE slug = $1 OR slug LIKE $2")
                .bind(base)
                .bind(format!("{base}-%"))
                .fetch_all(&self.pool)
                .await?;

        Ok(slugs)
    }

    async fn list_all(&self) -> BlogResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn publish_dates_from(&self, from: DateTime<Utc>) -> BlogResult<Vec<DateTime<Utc>>> {
        let dates: Vec<DateTime<Utc>> = sqlx::query_scalar(
            "SELECT published_at FROM posts WHERE published_at >= $1 ORDER BY published_at",
        )
        .bind(from)
        .fetch_all(&self.pool)
        .await?;

        Ok(dates)
    }

    async fn create(&self, post: &Post) -> BlogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id, title, slug, excerpt, content_html, tags,
                hero_image_url, related_tools, published_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.excerpt)
        .bind(&post.content_html)
        .bind(&post.tags)
        .bind(&post.hero_image_url)
        .bind(&post.related_tools)
        .bind(post.published_at)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    title: String,
    slug: String,
    excerpt: Option<String>,
    content_html: String,
    tags: Vec<String>,
    hero_image_url: Option<String>,
    related_tools: Option<Vec<String>>,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: PostId::from_uuid(self.post_id),
            title: self.title,
            slug: self.slug,
            excerpt: self.excerpt,
            content_html: self.content_html,
            tags: self.tags,
            hero_image_url: self.hero_image_url,
            related_tools: self.related_tools,
            published_at: self.published_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
