//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use social_cache::{RedisPool, RedisPoolConfig};
use social_common::{AppConfig, AppError, JwtService};
use social_core::SnowflakeGenerator;
use social_db::{
    create_pool, run_migrations, PgCommentRepository, PgLikeRepository, PgPostRepository,
    PgScheduledPostRepository, PgSubscriptionRepository, PgTagRepository, PgUserRepository,
};
use social_service::{PublicationWorker, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health probes are merged outside the middleware stack so they
/// bypass rate limiting.
pub fn create_app(state: AppState) -> Router {
    let router = {
        let config = state.config();
        let api = apply_middleware_with_config(
            create_router(),
            &config.rate_limit,
            &config.cors,
            &config.storage,
            config.app.env.is_production(),
        );
        api.merge(health_routes())
    };
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
///
/// Also starts the deferred publication worker.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = social_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Apply pending migrations
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Database migrations applied");

    // Create Redis pool
    info!("Connecting to Redis...");
    let redis_config = RedisPoolConfig::from(&config.redis);
    let redis_pool = RedisPool::new(redis_config).map_err(|e| AppError::Cache(e.to_string()))?;
    let shared_redis = Arc::new(redis_pool);
    info!("Redis connection established");

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    // Create Snowflake generator
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Create repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let subscription_repo = Arc::new(PgSubscriptionRepository::new(pool.clone()));
    let tag_repo = Arc::new(PgTagRepository::new(pool.clone()));
    let post_repo = Arc::new(PgPostRepository::new(pool.clone()));
    let like_repo = Arc::new(PgLikeRepository::new(pool.clone()));
    let comment_repo = Arc::new(PgCommentRepository::new(pool.clone()));
    let scheduled_post_repo = Arc::new(PgScheduledPostRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .redis_pool(shared_redis)
        .user_repo(user_repo)
        .subscription_repo(subscription_repo)
        .tag_repo(tag_repo)
        .post_repo(post_repo)
        .like_repo(like_repo)
        .comment_repo(comment_repo)
        .scheduled_post_repo(scheduled_post_repo)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .storage(config.storage.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    // Start the publication worker
    Arc::new(PublicationWorker::new(
        service_context.clone(),
        &config.scheduler,
    ))
    .start();

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
