use crate::error::{storage_upload_error, ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{extract_upload_form, sanitize_path, unix_millis, UploadForm};
use arforge_core::constants::{
    MIND_FILE_CONTENT_TYPE, MIND_FILE_DEFAULT_NAME, MIND_FILE_EXTENSION, MIND_FILE_MIN_BYTES,
};
use arforge_core::models::MindUploadResponse;
use arforge_core::AppError;
use arforge_storage::{UploadOptions, MIND_FILES_BUCKET};
use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

const UPLOAD_FAILED_CONTEXT: &str = ".mind file upload failed: Failed to upload .mind file";

#[utoipa::path(
    post,
    path = "/api/upload/mind",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "`file`: compiled MindAR target; `path`: optional destination path"),
    responses(
        (status = 200, description = "Mind file uploaded successfully", body = MindUploadResponse),
        (status = 400, description = "Missing, mistyped, or truncated file", body = ErrorResponse),
        (status = 413, description = "Request body exceeds the upload size limit", body = ErrorResponse),
        (status = 500, description = "Storage not configured or upload failed", body = ErrorResponse)
    )
)]
pub async fn upload_mind_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<MindUploadResponse>, HttpAppError> {
    let form = extract_upload_form(multipart).await?;
    let response = store_mind_file(&state, form).await?;
    Ok(Json(response))
}

/// Validate a mind file form and store it (or fabricate a mock URL).
pub async fn store_mind_file(
    state: &AppState,
    form: UploadForm,
) -> Result<MindUploadResponse, AppError> {
    let path = form.path().map(|p| p.to_string());
    let file = form
        .file
        .ok_or_else(|| AppError::InvalidInput("No file uploaded".to_string()))?;

    let path = path.unwrap_or_else(|| {
        format!(
            "mind-{}-{}",
            unix_millis(),
            file.filename().unwrap_or(MIND_FILE_DEFAULT_NAME)
        )
    });

    let has_extension = path.ends_with(MIND_FILE_EXTENSION)
        || file
            .filename()
            .is_some_and(|name| name.ends_with(MIND_FILE_EXTENSION));
    if !has_extension {
        return Err(AppError::InvalidInput(
            "Invalid file type. Must be a .mind file.".to_string(),
        ));
    }

    if file.size() < MIND_FILE_MIN_BYTES {
        return Err(AppError::InvalidInput(
            "Invalid .mind file. File is too small.".to_string(),
        ));
    }

    tracing::info!(
        path = %path,
        filename = file.filename().unwrap_or("-"),
        size = file.size(),
        mock = state.config.mock_uploads,
        "Uploading .mind file"
    );

    if state.config.mock_uploads {
        let safe_path = sanitize_path(&path);
        let url = format!(
            "{}/{}/{}",
            state.config.mock_upload_base_url, MIND_FILES_BUCKET, safe_path
        );
        return Ok(MindUploadResponse::new(url, safe_path));
    }

    let settings = state.config.storage_settings()?;
    let storage = state
        .storage
        .connect(&settings)
        .map_err(|e| storage_upload_error(UPLOAD_FAILED_CONTEXT, e))?;

    storage
        .upload(
            MIND_FILES_BUCKET,
            &path,
            file.data,
            &UploadOptions::create_only(MIND_FILE_CONTENT_TYPE),
        )
        .await
        .map_err(|e| storage_upload_error(UPLOAD_FAILED_CONTEXT, e))?;

    let url = storage.public_url(MIND_FILES_BUCKET, &path);
    tracing::info!(path = %path, url = %url, "Stored .mind file");

    Ok(MindUploadResponse::new(url, path))
}
