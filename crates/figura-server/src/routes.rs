use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use http::StatusCode;
use serde_json::json;

use crate::{
    AppState,
    error::GenerateError,
    pipeline::GenerateResponse,
    upload::{DesignUpload, UploadGuard},
};

/// Liveness message at `/`
pub async fn root_handler() -> impl IntoResponse {
    Json(json!({ "message": "Backend is running!" }))
}

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// `POST /generate-code/`
///
/// The upload lives on disk only while this handler runs.
pub async fn generate_code_handler(
    State(state): State<Arc<AppState>>,
    upload: DesignUpload,
) -> Result<Json<GenerateResponse>, GenerateError> {
    tracing::info!(filename = %upload.filename, size = upload.bytes.len(), "received design");

    let guard = UploadGuard::store(&state.upload_dir, &upload).await?;
    let response = state.pipeline.run(guard.path()).await?;

    Ok(Json(response))
}
