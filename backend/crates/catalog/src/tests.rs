//! Router-level tests for the catalog crate

use crate::application::config::CatalogConfig;
use crate::domain::entities::{Category, PricingDetails, Tool};
use crate::domain::repository::{CategoryRepository, ToolRepository, WebsiteFetcher};
use crate::error::{CatalogError, CatalogResult};
use crate::infra::memory::InMemoryCatalogRepository;
use crate::presentation::router::{CatalogRouters, catalog_router_generic};
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

// ============================================================================
// Fixtures
// ============================================================================

fn tool(name: &str, category: &str, tags: &[&str], score: i32) -> Tool {
    let mut t = Tool::new(name, crate::domain::services::slugify(name));
    t.category = Some(category.to_string());
    t.tags = tags.iter().map(|s| s.to_string()).collect();
    t.popularity_score = score;
    t.description = Some(format!("{} does useful things", name));
    t
}

fn fixture_tools() -> Vec<Tool> {
    let now = Utc::now();

    let mut chatgpt = tool("ChatGPT", "Text AI", &["chatbot", "writing"], 100);
    chatgpt.pricing_free = true;
    chatgpt.pricing_tier = Some("freemium".into());
    chatgpt.pricing_details = Some(PricingDetails {
        monthly: Some("20".into()),
        ..Default::default()
    });
    chatgpt.website_url = Some("https://chat.example".into());

    let mut jasper = tool("Jasper", "Text AI", &["writing", "marketing"], 70);
    jasper.pricing_tier = Some("paid".into());
    jasper.created_at = now - Duration::days(30);

    let mut midjourney = tool("Midjourney", "Image AI", &["art"], 90);
    midjourney.pricing_tier = Some("paid".into());

    let mut copilot = tool("GitHub Copilot", "Code AI", &["coding"], 92);
    copilot.pricing_free = true;
    copilot.pricing_tier = Some("freemium".into());

    let no_site = tool("Offline Tool", "Code AI", &["coding"], 10);

    vec![chatgpt, jasper, midjourney, copilot, no_site]
}

fn fixture_categories() -> Vec<Category> {
    ["Text AI", "Image AI", "Code AI"]
        .into_iter()
        .map(|name| Category::new(name, crate::domain::services::slugify(name), None))
        .collect()
}

/// Fetcher returning canned HTML, or an upstream error when `None`
#[derive(Clone)]
struct StubFetcher {
    html: Option<String>,
}

impl WebsiteFetcher for StubFetcher {
    async fn fetch_html(&self, url: &str) -> CatalogResult<String> {
        self.html
            .clone()
            .ok_or_else(|| CatalogError::Upstream(format!("{} timed out", url)))
    }
}

/// Repository whose full listing or category listing can be made to fail
#[derive(Clone)]
struct FlakyRepo {
    inner: InMemoryCatalogRepository,
    fail_list_all: bool,
    fail_categories: bool,
}

impl ToolRepository for FlakyRepo {
    async fn list_all(&self) -> CatalogResult<Vec<Tool>> {
        if self.fail_list_all {
            return Err(CatalogError::Database(sqlx::Error::PoolTimedOut));
        }
        self.inner.list_all().await
    }

    async fn find_by_slug(&self, slug: &str) -> CatalogResult<Option<Tool>> {
        self.inner.find_by_slug(slug).await
    }

    async fn find_by_slugs(&self, slugs: &[String]) -> CatalogResult<Vec<Tool>> {
        self.inner.find_by_slugs(slugs).await
    }

    async fn search(&self, query: &str) -> CatalogResult<Vec<Tool>> {
        self.inner.search(query).await
    }

    async fn list_by_category(&self, category: &str) -> CatalogResult<Vec<Tool>> {
        self.inner.list_by_category(category).await
    }

    async fn upsert(&self, tool: &Tool) -> CatalogResult<()> {
        self.inner.upsert(tool).await
    }

    async fn update_enrichment(
        &self,
        slug: &str,
        description: &str,
        logo_url: Option<&str>,
    ) -> CatalogResult<bool> {
        self.inner.update_enrichment(slug, description, logo_url).await
    }
}

impl CategoryRepository for FlakyRepo {
    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        if self.fail_categories {
            return Err(CatalogError::Database(sqlx::Error::PoolClosed));
        }
        self.inner.list_categories().await
    }

    async fn upsert_category(&self, category: &Category) -> CatalogResult<()> {
        self.inner.upsert_category(category).await
    }
}

fn routers_with(config: CatalogConfig, html: Option<&str>) -> (CatalogRouters, InMemoryCatalogRepository) {
    let repo = InMemoryCatalogRepository::with_data(fixture_tools(), fixture_categories());
    let fetcher = StubFetcher {
        html: html.map(str::to_string),
    };
    (catalog_router_generic(repo.clone(), fetcher, config), repo)
}

fn routers() -> CatalogRouters {
    routers_with(CatalogConfig::default(), None).0
}

fn flaky_routers(fail_list_all: bool, fail_categories: bool) -> CatalogRouters {
    let repo = FlakyRepo {
        inner: InMemoryCatalogRepository::with_data(fixture_tools(), fixture_categories()),
        fail_list_all,
        fail_categories,
    };
    catalog_router_generic(repo, StubFetcher { html: None }, CatalogConfig::default())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn slugs(tools: &Value) -> Vec<String> {
    tools
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["slug"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Listing
// ============================================================================

#[cfg(test)]
mod list_tools_tests {
    use super::*;

    #[tokio::test]
    async fn test_default_listing_is_by_popularity() {
        let response = routers().public.oneshot(get("/tools")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::ETAG));
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, s-maxage=3600, stale-while-revalidate=86400, max-age=3600"
        );

        let body = json_body(response).await;
        assert_eq!(
            slugs(&body["tools"]),
            ["chatgpt", "github-copilot", "midjourney", "jasper", "offline-tool"]
        );
        assert_eq!(body["total_tools"], 5);
        assert_eq!(body["page"], 1);
        assert_eq!(body["total_pages"], 1);
        assert_eq!(body["categories"][0]["name"], "Code AI");
        assert_eq!(body["categories"][0]["count"], 2);
    }

    #[tokio::test]
    async fn test_matching_etag_gets_not_modified() {
        let app = routers().public;

        let first = app.clone().oneshot(get("/tools?sort=name")).await.unwrap();
        let etag = first.headers().get(header::ETAG).unwrap().clone();

        let request = Request::builder()
            .uri("/tools?sort=name")
            .header(header::IF_NONE_MATCH, etag.clone())
            .body(Body::empty())
            .unwrap();
        let second = app.oneshot(request).await.unwrap();

        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(second.headers().get(header::ETAG).unwrap(), &etag);
    }

    #[tokio::test]
    async fn test_search_matches_tags_and_text() {
        let response = routers()
            .public
            .oneshot(get("/tools?search=writing"))
            .await
            .unwrap();
        let body = json_body(response).await;

        assert_eq!(slugs(&body["tools"]), ["chatgpt", "jasper"]);
        assert_eq!(body["total_items"], 2);
        assert_eq!(body["total_tools"], 5);
    }

    #[tokio::test]
    async fn test_category_pricing_and_sort() {
        let response = routers()
            .public
            .oneshot(get("/tools?category=Text%20AI&pricing=paid"))
            .await
            .unwrap();
        assert_eq!(slugs(&json_body(response).await["tools"]), ["jasper"]);

        let response = routers()
            .public
            .oneshot(get("/tools?pricing=free&sort=name"))
            .await
            .unwrap();
        assert_eq!(
            slugs(&json_body(response).await["tools"]),
            ["chatgpt", "github-copilot"]
        );

        let response = routers()
            .public
            .oneshot(get("/tools?sort=oldest"))
            .await
            .unwrap();
        assert_eq!(slugs(&json_body(response).await["tools"])[0], "jasper");
    }

    #[tokio::test]
    async fn test_pagination_and_bad_page_numbers() {
        let config = CatalogConfig {
            tools_per_page: 2,
            ..Default::default()
        };
        let app = routers_with(config, None).0.public;

        let body = json_body(app.clone().oneshot(get("/tools?page=3")).await.unwrap()).await;
        assert_eq!(slugs(&body["tools"]), ["offline-tool"]);
        assert_eq!(body["total_pages"], 3);

        let body = json_body(app.clone().oneshot(get("/tools?page=-4")).await.unwrap()).await;
        assert_eq!(body["page"], 1);

        let body = json_body(app.oneshot(get("/tools?page=abc")).await.unwrap()).await;
        assert_eq!(body["page"], 1);
        assert_eq!(slugs(&body["tools"]), ["chatgpt", "github-copilot"]);
    }

    #[tokio::test]
    async fn test_failed_full_listing_falls_back_to_categories() {
        let response = flaky_routers(true, false)
            .public
            .oneshot(get("/tools"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CACHE_CONTROL).unwrap(), "no-cache");
        assert!(!response.headers().contains_key(header::ETAG));

        let body = json_body(response).await;
        assert_eq!(body["total_tools"], 5);
        assert_eq!(body["tools"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_total_failure_degrades_to_empty_page() {
        let response = flaky_routers(true, true)
            .public
            .oneshot(get("/tools"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["total_tools"], 0);
        assert!(body["tools"].as_array().unwrap().is_empty());
    }
}

// ============================================================================
// Tool page and comparison
// ============================================================================

#[cfg(test)]
mod tool_page_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_tool_with_related() {
        let response = routers()
            .public
            .oneshot(get("/tools/chatgpt"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::ETAG));

        let body = json_body(response).await;
        assert_eq!(body["tool"]["name"], "ChatGPT");
        assert_eq!(body["pricing_label"], "$20/month");
        assert_eq!(body["metadata"]["title"], "ChatGPT - aItoolfinder");
        assert_eq!(slugs(&body["related_tools"]), ["jasper"]);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_problem_404() {
        let response = routers()
            .public
            .oneshot(get("/tools/nope"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["detail"], "Tool not found: nope");
    }

    #[tokio::test]
    async fn test_compare_keeps_requested_order() {
        let response = routers()
            .public
            .oneshot(get("/compare?slugs=midjourney,%20chatgpt,midjourney"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(slugs(&body["tools"]), ["midjourney", "chatgpt"]);
        assert_eq!(body["tools"][1]["pricing"], "$20/month");
    }

    #[tokio::test]
    async fn test_compare_rejections() {
        let app = routers().public;

        let none = app.clone().oneshot(get("/compare")).await.unwrap();
        assert_eq!(none.status(), StatusCode::BAD_REQUEST);

        let too_many = app
            .clone()
            .oneshot(get("/compare?slugs=a,b,c,d,e"))
            .await
            .unwrap();
        assert_eq!(too_many.status(), StatusCode::BAD_REQUEST);

        let unknown = app
            .oneshot(get("/compare?slugs=chatgpt,ghost"))
            .await
            .unwrap();
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    }
}

// ============================================================================
// Categories
// ============================================================================

#[cfg(test)]
mod category_tests {
    use super::*;

    #[tokio::test]
    async fn test_categories_sorted_by_name() {
        let response = routers().public.oneshot(get("/categories")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("public")
        );

        let body = json_body(response).await;
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["Code AI", "Image AI", "Text AI"]);
    }

    #[tokio::test]
    async fn test_category_failure_is_empty_no_cache() {
        let response = flaky_routers(false, true)
            .public
            .oneshot(get("/categories"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CACHE_CONTROL).unwrap(), "no-cache");
        assert_eq!(json_body(response).await, serde_json::json!([]));
    }
}

// ============================================================================
// Admin
// ============================================================================

#[cfg(test)]
mod admin_tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let repo = InMemoryCatalogRepository::new();
        let routers = catalog_router_generic(
            repo.clone(),
            StubFetcher { html: None },
            CatalogConfig::default(),
        );

        let response = routers.admin.clone().oneshot(post("/seed")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        let seeded_tools = body["tools"].as_u64().unwrap() as usize;
        assert!(seeded_tools >= 10);

        routers.admin.oneshot(post("/seed")).await.unwrap();

        assert_eq!(repo.list_all().await.unwrap().len(), seeded_tools);
        assert_eq!(repo.list_categories().await.unwrap().len(), 6);
        assert!(repo.find_by_slug("chatgpt").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_enrich_updates_description_and_logo() {
        let html = r#"<html><head>
            <meta name="description" content="ChatGPT helps you get answers, find inspiration and be more productive, free to use and easy to try.">
            <meta property="og:image" content="https://chat.example/og.png">
            </head><body>Plus is $20/month</body></html>"#;
        let (routers, repo) = routers_with(CatalogConfig::default(), Some(html));

        let response = routers
            .admin
            .oneshot(post("/tools/chatgpt/enrich"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["updated"], true);
        assert_eq!(body["logo_url"], "https://chat.example/og.png");

        let stored = repo.find_by_slug("chatgpt").await.unwrap().unwrap();
        assert!(stored.description.unwrap().starts_with("ChatGPT helps you"));
        assert_eq!(stored.logo_url.as_deref(), Some("https://chat.example/og.png"));
    }

    #[tokio::test]
    async fn test_enrich_failures() {
        let (routers, _) = routers_with(CatalogConfig::default(), None);

        let upstream = routers
            .admin
            .clone()
            .oneshot(post("/tools/chatgpt/enrich"))
            .await
            .unwrap();
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);

        let no_site = routers
            .admin
            .clone()
            .oneshot(post("/tools/offline-tool/enrich"))
            .await
            .unwrap();
        assert_eq!(no_site.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let unknown = routers
            .admin
            .oneshot(post("/tools/ghost/enrich"))
            .await
            .unwrap();
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    }
}
