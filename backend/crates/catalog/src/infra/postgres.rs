//! PostgreSQL Repository Implementations

use crate::domain::entities::{Category, PricingDetails, Tool};
use crate::domain::repository::{CategoryRepository, ToolRepository};
use crate::domain::services::escape_like;
use crate::error::CatalogResult;
use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, ToolId};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

const TOOL_COLUMNS: &str = r#"
    tool_id,
    name,
    slug,
    description,
    category,
    website_url,
    logo_url,
    pricing_free,
    pricing_tier,
    pricing_details,
    features,
    use_cases,
    tags,
    popularity_score,
    last_updated,
    created_at
"#;

/// PostgreSQL-backed catalog repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Tool Repository Implementation
// ============================================================================

impl ToolRepository for PgCatalogRepository {
    async fn list_all(&self) -> CatalogResult<Vec<Tool>> {
        let rows = sqlx::query_as::<_, ToolRow>(&format!(
            "SELECT {TOOL_COLUMNS} FROM tools ORDER BY popularity_score DESC, created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ToolRow::into_tool).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> CatalogResult<Option<Tool>> {
        let row = sqlx::query_as::<_, ToolRow>(&format!(
            "SELECT {TOOL_COLUMNS} FROM tools WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ToolRow::into_tool))
    }

    async fn find_by_slugs(&self, slugs: &[String]) -> CatalogResult<Vec<Tool>> {
        let rows = sqlx::query_as::<_, ToolRow>(&format!(
            "SELECT {TOOL_COLUMNS} FROM tools WHERE slug = ANY($1)"
        ))
        .bind(slugs)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ToolRow::into_tool).collect())
    }

    async fn search(&self, query: &str) -> CatalogResult<Vec<Tool>> {
        let pattern = format!("%{}%", escape_like(query));

        let rows = sqlx::query_as::<_, ToolRow>(&format!(
            r#"
            SELECT {TOOL_COLUMNS}
            FROM tools
            WHERE name ILIKE $1 ESCAPE '\'
               OR description ILIKE $1 ESCAPE '\'
               OR $2 = ANY(tags)
            ORDER BY popularity_score DESC, created_at DESC
            "#
        ))
        .bind(&pattern)
        .bind(query)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(query = %query, results = rows.len(), "Tool search");

        Ok(rows.into_iter().map(ToolRow::into_tool).collect())
    }

    async fn list_by_category(&self, category: &str) -> CatalogResult<Vec<Tool>> {
        let rows = sqlx::query_as::<_, ToolRow>(&format!(
            r#"
            SELECT {TOOL_COLUMNS}
            FROM tools
            WHERE category = $1
            ORDER BY popularity_score DESC, created_at DESC
            "#
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ToolRow::into_tool).collect())
    }

    async fn upsert(&self, tool: &Tool) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tools (
                tool_id,
                name,
                slug,
                description,
                category,
                website_url,
                logo_url,
                pricing_free,
                pricing_tier,
                pricing_details,
                features,
                use_cases,
                tags,
                popularity_score,
                last_updated,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ON CONFLICT (slug) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                category = EXCLUDED.category,
                website_url = EXCLUDED.website_url,
                logo_url = EXCLUDED.logo_url,
                pricing_free = EXCLUDED.pricing_free,
                pricing_tier = EXCLUDED.pricing_tier,
                pricing_details = EXCLUDED.pricing_details,
                features = EXCLUDED.features,
                use_cases = EXCLUDED.use_cases,
                tags = EXCLUDED.tags,
                popularity_score = EXCLUDED.popularity_score,
                last_updated = EXCLUDED.last_updated
            "#,
        )
        .bind(tool.id.into_uuid())
        .bind(&tool.name)
        .bind(&tool.slug)
        .bind(&tool.description)
        .bind(&tool.category)
        .bind(&tool.website_url)
        .bind(&tool.logo_url)
        .bind(tool.pricing_free)
        .bind(&tool.pricing_tier)
        .bind(tool.pricing_details.as_ref().map(Json))
        .bind(&tool.features)
        .bind(&tool.use_cases)
        .bind(&tool.tags)
        .bind(tool.popularity_score)
        .bind(tool.last_updated)
        .bind(tool.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(slug = %tool.slug, "Tool upserted");

        Ok(())
    }

    async fn update_enrichment(
        &self,
        slug: &str,
        description: &str,
        logo_url: Option<&str>,
    ) -> CatalogResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE tools
            SET description = $2,
                logo_url = COALESCE($3, logo_url),
                last_updated = now()
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .bind(description)
        .bind(logo_url)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Category Repository Implementation
// ============================================================================

impl CategoryRepository for PgCatalogRepository {
    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT category_id, name, slug, description
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn upsert_category(&self, category: &Category) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (category_id, name, slug, description)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (slug) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description
            "#,
        )
        .bind(category.id.into_uuid())
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ToolRow {
    tool_id: Uuid,
    name: String,
    slug: String,
    description: Option<String>,
    category: Option<String>,
    website_url: Option<String>,
    logo_url: Option<String>,
    pricing_free: bool,
    pricing_tier: Option<String>,
    pricing_details: Option<Json<PricingDetails>>,
    features: Vec<String>,
    use_cases: Vec<String>,
    tags: Vec<String>,
    popularity_score: i32,
    last_updated: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl ToolRow {
    fn into_tool(self) -> Tool {
        Tool {
            id: ToolId::from_uuid(self.tool_id),
            name: self.name,
            slug: self.slug,
            description: self.description,
            category: self.category,
            website_url: self.website_url,
            logo_url: self.logo_url,
            pricing_free: self.pricing_free,
            pricing_tier: self.pricing_tier,
            pricing_details: self.pricing_details.map(|Json(d)| d),
            features: self.features,
            use_cases: self.use_cases,
            tags: self.tags,
            popularity_score: self.popularity_score,
            last_updated: self.last_updated,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    category_id: Uuid,
    name: String,
    slug: String,
    description: Option<String>,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            id: CategoryId::from_uuid(self.category_id),
            name: self.name,
            slug: self.slug,
            description: self.description,
        }
    }
}
