//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod post;
mod scheduled_post;
mod tag;
mod user;

pub use comment::CommentModel;
pub use post::{LikeCountModel, PostModel};
pub use scheduled_post::ScheduledPostModel;
pub use tag::{PostTagModel, TagModel};
pub use user::UserModel;
