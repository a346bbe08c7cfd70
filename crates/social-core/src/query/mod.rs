//! Query filter types for list endpoints

mod filters;

pub use filters::{flag_enabled, parse_tag_csv, PostFilter, UserFilter};
