//! Collision-free storage paths for uploaded images
//!
//! Uploads are stored relative to the configured upload directory as
//! `{kind}/{slug(key)}-{uuid}.{ext}`, where the key is the owner's email
//! for profile photos and the post title for post images. The slug keeps
//! paths readable; the uuid keeps them unique.

use uuid::Uuid;

/// Image extensions accepted for upload
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// What the upload is attached to; decides the storage subdirectory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    UserPhoto,
    PostImage,
}

impl UploadKind {
    fn subdir(self) -> &'static str {
        match self {
            Self::UserPhoto => "users",
            Self::PostImage => "posts",
        }
    }
}

/// Check whether a file extension (without dot) is an accepted image type
pub fn extension_allowed(extension: &str) -> bool {
    let ext = extension.to_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str())
}

/// Convert text to a URL-safe slug
///
/// Lowercases, replaces every non-alphanumeric run with a single hyphen,
/// and trims hyphens from both ends. May return an empty string when the
/// input has no alphanumeric characters.
pub fn slugify(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Build the storage path (relative to the upload directory) for a new upload
pub fn upload_path(kind: UploadKind, key: &str, extension: &str) -> String {
    let slug = slugify(key);
    let ext = extension.to_lowercase();
    let unique = Uuid::new_v4();

    if slug.is_empty() {
        format!("{}/{unique}.{ext}", kind.subdir())
    } else {
        format!("{}/{slug}-{unique}.{ext}", kind.subdir())
    }
}
