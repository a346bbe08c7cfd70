//! Entity to model mappers
//!
//! This module provides conversions between domain entities (social-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert`/`*Update` structs: Prepare entity data for database operations

mod comment;
mod post;
mod scheduled_post;
mod tag;
mod user;

pub use comment::CommentInsert;
pub use post::{PostInsert, PostUpdate};
pub use scheduled_post::ScheduledPostInsert;
pub use user::{UserInsert, UserUpdate};
