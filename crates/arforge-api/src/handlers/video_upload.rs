use crate::error::{storage_upload_error, ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{
    extract_upload_form, format_mb, is_allowed_content_type, sanitize_filename, unix_millis,
    UploadForm,
};
use arforge_core::constants::{VIDEO_ALLOWED_CONTENT_TYPES, VIDEO_DEFAULT_NAME};
use arforge_core::models::VideoUploadResponse;
use arforge_core::AppError;
use arforge_storage::{UploadOptions, VIDEOS_BUCKET};
use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

const UPLOAD_FAILED_CONTEXT: &str = "Video upload failed: Failed to upload video";

#[utoipa::path(
    post,
    path = "/api/upload/video",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "`file`: MP4, WebM, Ogg, AVI, or MOV video"),
    responses(
        (status = 200, description = "Video uploaded successfully", body = VideoUploadResponse),
        (status = 400, description = "Missing file or unsupported format", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage not configured or upload failed", body = ErrorResponse)
    )
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<VideoUploadResponse>, HttpAppError> {
    let form = extract_upload_form(multipart).await.map_err(|e| match e {
        // The body limit cut the stream short; report the configured ceiling.
        AppError::PayloadTooLarge(_) => AppError::PayloadTooLarge(format!(
            "Video file too large. Maximum size is {}MB",
            state.config.max_video_size_mb
        )),
        other => other,
    })?;
    let response = store_video(&state, form).await?;
    Ok(Json(response))
}

/// Validate a video form and store it (or fabricate a mock URL).
pub async fn store_video(
    state: &AppState,
    form: UploadForm,
) -> Result<VideoUploadResponse, AppError> {
    let file = form
        .file
        .ok_or_else(|| AppError::InvalidInput("No file uploaded".to_string()))?;

    let max_bytes = state.config.max_video_size_bytes();
    if file.size() as u64 > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "Video file too large. Maximum size is {}MB, your file is {}MB",
            state.config.max_video_size_mb,
            format_mb(file.size())
        )));
    }

    let content_type = file.content_type().to_string();
    if !is_allowed_content_type(&content_type, VIDEO_ALLOWED_CONTENT_TYPES) {
        return Err(AppError::InvalidInput(format!(
            "Unsupported video format. Please use MP4, WebM, or MOV files. Current type: {}",
            content_type
        )));
    }

    tracing::info!(
        filename = file.filename().unwrap_or("-"),
        size = file.size(),
        content_type = %content_type,
        mock = state.config.mock_uploads,
        "Uploading video"
    );

    if state.config.mock_uploads {
        let safe_name = sanitize_filename(file.filename().unwrap_or_default());
        let safe_name = if safe_name.is_empty() {
            VIDEO_DEFAULT_NAME.to_string()
        } else {
            safe_name
        };
        let url = format!(
            "{}/{}/video-{}-{}",
            state.config.mock_upload_base_url,
            VIDEOS_BUCKET,
            unix_millis(),
            safe_name
        );
        return Ok(VideoUploadResponse::new(url));
    }

    let settings = state.config.storage_settings()?;
    let storage = state
        .storage
        .connect(&settings)
        .map_err(|e| storage_upload_error(UPLOAD_FAILED_CONTEXT, e))?;

    let name = format!(
        "video-{}-{}",
        unix_millis(),
        file.filename().unwrap_or(VIDEO_DEFAULT_NAME)
    );

    storage
        .upload(
            VIDEOS_BUCKET,
            &name,
            file.data,
            &UploadOptions::create_only(content_type),
        )
        .await
        .map_err(|e| storage_upload_error(UPLOAD_FAILED_CONTEXT, e))?;

    let url = storage.public_url(VIDEOS_BUCKET, &name);
    tracing::info!(name = %name, url = %url, "Stored video");

    Ok(VideoUploadResponse::new(url))
}
