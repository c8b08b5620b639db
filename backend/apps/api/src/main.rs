//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod app;
mod config;

use app::{AppParts, build_app};
use blog::{BlogConfig, PgBlogRepository, blog_router};
use catalog::{CatalogConfig, PgCatalogRepository, catalog_router};
use config::ServerConfig;
use platform::admin::AdminGuard;
use platform::middleware::RateLimitState;
use platform::rate_limit::{FixedWindowRateLimiter, spawn_sweeper};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "toolfinder_api=info,catalog=info,blog=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Rate limiting: one in-process table for all public routes
    let limiter = Arc::new(FixedWindowRateLimiter::new());
    spawn_sweeper(limiter.clone(), config.rate_limit_sweep);
    tracing::info!(
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window.as_secs(),
        "Rate limiter started"
    );

    let catalog = catalog_router(
        PgCatalogRepository::new(pool.clone()),
        CatalogConfig::with_site_name(config.site_name.clone()),
    )?;
    let blog = blog_router(
        PgBlogRepository::new(pool.clone()),
        PgCatalogRepository::new(pool),
        BlogConfig::with_site_name(config.site_name.clone()),
    );

    let app = build_app(AppParts {
        catalog,
        blog,
        rate_limit: RateLimitState::new(limiter, config.rate_limit.clone()),
        admin_guard: Arc::new(AdminGuard::new(&config.admin_secret)),
        frontend_origins: config.frontend_origins.clone(),
    });

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
