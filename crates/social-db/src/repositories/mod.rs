//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in social-core.
//! Each repository handles database operations for a specific domain entity.

mod comment;
mod error;
mod like;
mod post;
mod scheduled_post;
mod subscription;
mod tag;
mod user;

pub use comment::PgCommentRepository;
pub use like::PgLikeRepository;
pub use post::PgPostRepository;
pub use scheduled_post::PgScheduledPostRepository;
pub use subscription::PgSubscriptionRepository;
pub use tag::PgTagRepository;
pub use user::PgUserRepository;
