use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    body::Body,
    extract::{FromRequest, Multipart},
};
use uuid::Uuid;

use crate::{AppState, error::GenerateError};

/// Multipart field that carries the design image
const FILE_FIELD: &str = "file";

/// Name used when the client sends no usable filename
const DEFAULT_FILENAME: &str = "upload.png";

/// Design image received in a `multipart/form-data` body
#[derive(Debug)]
pub struct DesignUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl FromRequest<Arc<AppState>> for DesignUpload {
    type Rejection = GenerateError;

    async fn from_request(request: http::Request<Body>, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let content_type = request
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("multipart/form-data") {
            return Err(GenerateError::Upload(
                "expected 'Content-Type: multipart/form-data'".to_string(),
            ));
        }

        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| GenerateError::Upload(format!("failed to parse multipart form: {e}")))?;

        loop {
            let field = multipart
                .next_field()
                .await
                .map_err(|e| GenerateError::Upload(format!("failed to read multipart form: {e}")))?;

            let Some(field) = field else {
                break;
            };

            if field.name() != Some(FILE_FIELD) {
                continue;
            }

            let filename = sanitize_filename(field.file_name());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| GenerateError::Upload(format!("failed to read file data: {e}")))?;

            return Ok(Self {
                filename,
                bytes: bytes.to_vec(),
            });
        }

        Err(GenerateError::Upload(format!(
            "missing required '{FILE_FIELD}' field in multipart form"
        )))
    }
}

/// Reduce a client supplied filename to its final path component
fn sanitize_filename(name: Option<&str>) -> String {
    name.and_then(|n| Path::new(n).file_name())
        .and_then(std::ffi::OsStr::to_str)
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(DEFAULT_FILENAME)
        .to_string()
}

/// An upload written to disk for the duration of one request
///
/// The file is removed when the guard is dropped, whether the request
/// succeeded, failed or was cancelled. Removal failures are ignored.
#[derive(Debug)]
pub struct UploadGuard {
    path: PathBuf,
}

impl UploadGuard {
    /// Write `upload` into `dir`, creating the directory if needed
    ///
    /// Names are prefixed with a random UUID so concurrent requests with the
    /// same filename never collide.
    pub async fn store(dir: &Path, upload: &DesignUpload) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create upload directory {}", dir.display()))?;

        let guard = Self {
            path: dir.join(format!("{}-{}", Uuid::new_v4(), upload.filename)),
        };

        tokio::fs::write(&guard.path, &upload.bytes)
            .await
            .with_context(|| format!("failed to store upload at {}", guard.path.display()))?;

        tracing::debug!(path = %guard.path.display(), size = upload.bytes.len(), "stored upload");

        Ok(guard)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        // Drop cannot await; removing one small file blocks only briefly
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed upload"),
            Err(e) => tracing::debug!(path = %self.path.display(), error = %e, "could not remove upload"),
        }
    }
}
