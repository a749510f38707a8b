//! Reframe - A lightweight CBT thought-journaling backend

use anyhow::Result;
use chrono::Duration;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reframe::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{SqlxSessionRepository, SqlxThoughtRepository, SqlxUserRepository},
    },
    services::{rate_limiter::RateLimiter, thought::ThoughtService, user::AuthService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reframe=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting reframe backend...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {:?}", config.database.driver);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Create repositories
    let user_repo = SqlxUserRepository::boxed(pool.clone());
    let session_repo = SqlxSessionRepository::boxed(pool.clone());
    let thought_repo = SqlxThoughtRepository::boxed(pool.clone());

    // Initialize services
    let auth_service = Arc::new(AuthService::with_session_ttl(
        user_repo,
        session_repo,
        config.session.ttl_hours,
    ));
    let thought_service = Arc::new(ThoughtService::new(thought_repo));

    let window = Duration::minutes(config.rate_limit.window_minutes);
    let auth_limiter = Arc::new(RateLimiter::new(
        window,
        config.rate_limit.auth_max_attempts,
    ));
    let api_limiter = Arc::new(RateLimiter::new(window, config.rate_limit.api_max_requests));

    let state = AppState {
        pool: pool.clone(),
        auth_service: auth_service.clone(),
        thought_service,
        auth_limiter: auth_limiter.clone(),
        api_limiter: api_limiter.clone(),
    };

    // Periodic maintenance: evict stale limiter entries and expired
    // sessions (runs every 5 minutes)
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(300));
        loop {
            interval.tick().await;
            auth_limiter.cleanup().await;
            api_limiter.cleanup().await;
            match auth_service.cleanup_expired_sessions().await {
                Ok(removed) if removed > 0 => {
                    tracing::info!(removed, "Expired sessions removed");
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Session cleanup failed: {}", e),
            }
        }
    });

    // Build router
    let app = api::build_router(state, &config.server.cors_origins);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
