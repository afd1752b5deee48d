//! Authenticated file upload to object storage.

use std::sync::OnceLock;

use aws_sdk_s3::primitives::ByteStream;
use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use bytes::Bytes;
use regex::Regex;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
/// Room for multipart boundaries and part headers on top of the file itself.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

fn allowed_types() -> &'static Regex {
    static ALLOWED: OnceLock<Regex> = OnceLock::new();
    ALLOWED.get_or_init(|| Regex::new(r"jpeg|jpg|png|gif|pdf|doc|docx").expect("valid type pattern"))
}

/// Lowercased extension of `file_name`, without the dot.
pub fn extension_of(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Both the extension and the declared content type must name an allowed type.
pub fn check_file_type(file_name: &str, content_type: &str) -> Result<String, AppError> {
    let invalid = || AppError::BadRequest("Invalid file type".to_string());
    let ext = extension_of(file_name).ok_or_else(invalid)?;
    if allowed_types().is_match(&ext) && allowed_types().is_match(content_type) {
        Ok(ext)
    } else {
        Err(invalid())
    }
}

pub fn object_key(user_id: Uuid, file_id: Uuid, ext: &str) -> String {
    format!("uploads/{user_id}/{file_id}.{ext}")
}

pub fn public_url(base: &str, key: &str) -> String {
    format!("{}/{key}", base.trim_end_matches('/'))
}

async fn read_file(field: Field<'_>) -> Result<Bytes, AppError> {
    field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

/// POST /api/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let ext = check_file_type(&file_name, &content_type)?;

        let data = read_file(field).await?;
        if data.is_empty() {
            return Err(AppError::BadRequest("No file uploaded".to_string()));
        }
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::BadRequest(
                "File exceeds the 5 MB upload limit".to_string(),
            ));
        }

        let key = object_key(user.id(), Uuid::new_v4(), &ext);
        let size = data.len();
        state
            .s3
            .put_object()
            .bucket(&state.config.s3_bucket)
            .key(&key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::S3(e.to_string()))?;

        info!("Uploaded {size} bytes to s3://{}/{key}", state.config.s3_bucket);
        return Ok(Json(UploadResponse {
            url: public_url(&state.config.s3_public_url, &key),
        }));
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}
