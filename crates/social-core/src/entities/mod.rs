//! Domain entities - core business objects

mod comment;
mod post;
mod scheduled_post;
mod tag;
mod user;

pub use comment::Comment;
pub use post::{Like, Post};
pub use scheduled_post::ScheduledPost;
pub use tag::Tag;
pub use user::{Subscription, User};
