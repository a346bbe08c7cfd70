//! Service context - dependency container for services
//!
//! Holds all repositories, cache stores, and other dependencies needed by services.

use std::sync::Arc;

use social_cache::{RefreshTokenStore, RevokedTokenStore, SharedRedisPool};
use social_common::auth::JwtService;
use social_common::StorageConfig;
use social_core::traits::{
    CommentRepository, LikeRepository, PostRepository, ScheduledPostRepository,
    SubscriptionRepository, TagRepository, UserRepository,
};
use social_core::SnowflakeGenerator;
use social_db::PgPool;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - Redis token stores
/// - JWT service for authentication
/// - Snowflake generator for ID generation
/// - Upload storage settings
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    subscription_repo: Arc<dyn SubscriptionRepository>,
    tag_repo: Arc<dyn TagRepository>,
    post_repo: Arc<dyn PostRepository>,
    like_repo: Arc<dyn LikeRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    scheduled_post_repo: Arc<dyn ScheduledPostRepository>,

    // Token stores
    refresh_token_store: RefreshTokenStore,
    revoked_token_store: RevokedTokenStore,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,

    // Upload storage
    storage: StorageConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        redis_pool: SharedRedisPool,
        user_repo: Arc<dyn UserRepository>,
        subscription_repo: Arc<dyn SubscriptionRepository>,
        tag_repo: Arc<dyn TagRepository>,
        post_repo: Arc<dyn PostRepository>,
        like_repo: Arc<dyn LikeRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        scheduled_post_repo: Arc<dyn ScheduledPostRepository>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        storage: StorageConfig,
    ) -> Self {
        // Clone the inner RedisPool from the Arc
        let inner_pool = (*redis_pool).clone();
        let refresh_token_store = RefreshTokenStore::new(inner_pool.clone());
        let revoked_token_store = RevokedTokenStore::new(inner_pool);

        Self {
            pool,
            redis_pool,
            user_repo,
            subscription_repo,
            tag_repo,
            post_repo,
            like_repo,
            comment_repo,
            scheduled_post_repo,
            refresh_token_store,
            revoked_token_store,
            jwt_service,
            snowflake_generator,
            storage,
        }
    }

    // === Pools ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the subscription repository
    pub fn subscription_repo(&self) -> &dyn SubscriptionRepository {
        self.subscription_repo.as_ref()
    }

    /// Get the tag repository
    pub fn tag_repo(&self) -> &dyn TagRepository {
        self.tag_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the like repository
    pub fn like_repo(&self) -> &dyn LikeRepository {
        self.like_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the scheduled post repository
    pub fn scheduled_post_repo(&self) -> &dyn ScheduledPostRepository {
        self.scheduled_post_repo.as_ref()
    }

    // === Token Stores ===

    /// Get the refresh token store
    pub fn refresh_token_store(&self) -> &RefreshTokenStore {
        &self.refresh_token_store
    }

    /// Get the revoked access token store
    pub fn revoked_token_store(&self) -> &RevokedTokenStore {
        &self.revoked_token_store
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> social_core::Snowflake {
        self.snowflake_generator.generate()
    }

    // === Upload Storage ===

    /// Get the upload storage settings
    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .field("token_stores", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    subscription_repo: Option<Arc<dyn SubscriptionRepository>>,
    tag_repo: Option<Arc<dyn TagRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    like_repo: Option<Arc<dyn LikeRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    scheduled_post_repo: Option<Arc<dyn ScheduledPostRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    storage: Option<StorageConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            redis_pool: None,
            user_repo: None,
            subscription_repo: None,
            tag_repo: None,
            post_repo: None,
            like_repo: None,
            comment_repo: None,
            scheduled_post_repo: None,
            jwt_service: None,
            snowflake_generator: None,
            storage: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn subscription_repo(mut self, repo: Arc<dyn SubscriptionRepository>) -> Self {
        self.subscription_repo = Some(repo);
        self
    }

    pub fn tag_repo(mut self, repo: Arc<dyn TagRepository>) -> Self {
        self.tag_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn like_repo(mut self, repo: Arc<dyn LikeRepository>) -> Self {
        self.like_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn scheduled_post_repo(mut self, repo: Arc<dyn ScheduledPostRepository>) -> Self {
        self.scheduled_post_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn storage(mut self, storage: StorageConfig) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool.ok_or_else(|| super::error::ServiceError::validation("pool is required"))?,
            self.redis_pool.ok_or_else(|| super::error::ServiceError::validation("redis_pool is required"))?,
            self.user_repo.ok_or_else(|| super::error::ServiceError::validation("user_repo is required"))?,
            self.subscription_repo.ok_or_else(|| super::error::ServiceError::validation("subscription_repo is required"))?,
            self.tag_repo.ok_or_else(|| super::error::ServiceError::validation("tag_repo is required"))?,
            self.post_repo.ok_or_else(|| super::error::ServiceError::validation("post_repo is required"))?,
            self.like_repo.ok_or_else(|| super::error::ServiceError::validation("like_repo is required"))?,
            self.comment_repo.ok_or_else(|| super::error::ServiceError::validation("comment_repo is required"))?,
            self.scheduled_post_repo.ok_or_else(|| super::error::ServiceError::validation("scheduled_post_repo is required"))?,
            self.jwt_service.ok_or_else(|| super::error::ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator.ok_or_else(|| super::error::ServiceError::validation("snowflake_generator is required"))?,
            self.storage.ok_or_else(|| super::error::ServiceError::validation("storage is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
