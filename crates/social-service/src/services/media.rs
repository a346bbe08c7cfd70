//! Media service
//!
//! Validates uploaded images and writes them under the upload directory.

use std::path::Path;

use social_common::{extension_allowed, upload_path, UploadKind};
use social_core::DomainError;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Media service
pub struct MediaService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MediaService<'a> {
    /// Create a new MediaService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate and persist an uploaded image
    ///
    /// Returns the storage path relative to the upload directory. The
    /// `key` seeds the readable part of the filename: the owner's email
    /// for profile photos, the post title for post images.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn store_upload(
        &self,
        kind: UploadKind,
        key: &str,
        filename: &str,
        data: &[u8],
    ) -> ServiceResult<String> {
        let max_bytes = self.ctx.storage().max_file_size_bytes();
        if data.len() > max_bytes {
            return Err(DomainError::FileTooLarge { max_bytes }.into());
        }

        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| DomainError::UnsupportedImageType(filename.to_string()))?;

        if !extension_allowed(extension) {
            return Err(DomainError::UnsupportedImageType(extension.to_string()).into());
        }

        let relative = upload_path(kind, key, &extension.to_lowercase());
        let full = Path::new(&self.ctx.storage().upload_dir).join(&relative);

        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::internal(e.to_string()))?;
        }

        tokio::fs::write(&full, data)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        info!(path = %relative, "Upload stored");

        Ok(relative)
    }
}
