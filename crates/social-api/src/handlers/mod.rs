//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod health;
pub mod posts;
pub mod users;

use axum::extract::Multipart;

use crate::response::ApiError;

/// Read a single named file field from a multipart body
///
/// Other fields are skipped; the first match wins.
pub(crate) async fn read_file_field(
    mut multipart: Multipart,
    field_name: &str,
) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidBody(e.to_string()))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let filename = field
            .file_name()
            .ok_or_else(|| ApiError::InvalidBody("Uploaded file has no filename".to_string()))?
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidBody(e.to_string()))?;

        return Ok((filename, data.to_vec()));
    }

    Err(ApiError::InvalidBody(format!(
        "Missing file field '{field_name}'"
    )))
}
