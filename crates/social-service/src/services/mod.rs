//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod like;
pub mod media;
pub mod policy;
pub mod post;
pub mod scheduler;
pub mod subscription;
pub mod user;

// Re-export all services for convenience
pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use like::LikeService;
pub use media::MediaService;
pub use policy::{authorize, PostAction};
pub use post::PostService;
pub use scheduler::{PublicationWorker, SchedulerService};
pub use subscription::SubscriptionService;
pub use user::UserService;
