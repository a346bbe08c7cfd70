//! Upload naming helpers

mod upload_path;

pub use upload_path::{extension_allowed, slugify, upload_path, UploadKind, ALLOWED_EXTENSIONS};
