//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and query filters.

mod auth;
mod path;
mod query;
mod validated;

pub use auth::AuthUser;
pub use path::{PostIdPath, UserIdPath};
pub use query::{PostFilterParams, PostFilterQuery, UserFilterParams, UserFilterQuery};
pub use validated::ValidatedJson;
