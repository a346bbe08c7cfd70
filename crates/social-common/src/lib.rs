//! # social-common
//!
//! Shared utilities including configuration, error handling, authentication,
//! telemetry, and upload path generation.

pub mod auth;
pub mod config;
pub mod error;
pub mod media;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, validate_password_strength, verify_password, Claims, JwtService,
    PasswordService, TokenPair, TokenType,
};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    RateLimitConfig, RedisConfig, SchedulerConfig, ServerConfig, SnowflakeConfig, StorageConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use media::{extension_allowed, slugify, upload_path, UploadKind};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
