//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`. Use `AppError`
//! for errors so every failure renders the same `{ "error", "code" }` envelope.

use arforge_core::{AppError, ErrorMetadata, LogLevel};
use arforge_storage::StorageError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from arforge-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error.detailed_message(),
                error_type = error_type,
                "Request failed"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse::new(
            app_error.client_message(),
            app_error.error_code(),
        ));

        (status, body).into_response()
    }
}

/// Convert a failed storage call into the handler's error, prefixed with what was being uploaded.
///
/// Rejected paths are the client's fault and stay 400; everything else is an upstream failure.
pub fn storage_upload_error(context: &str, err: StorageError) -> AppError {
    match err {
        StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
        StorageError::ConfigError(msg) => AppError::Configuration(msg),
        other => AppError::Upstream(format!("{}: {}", context, other.message())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_upload_failure_is_upstream_with_context() {
        let err = storage_upload_error(
            "Video upload failed: Failed to upload video",
            StorageError::UploadFailed("Bucket not found".to_string()),
        );
        match err {
            AppError::Upstream(msg) => {
                assert_eq!(msg, "Video upload failed: Failed to upload video: Bucket not found")
            }
            other => panic!("Expected Upstream variant, got {:?}", other),
        }
    }

    #[test]
    fn test_storage_invalid_key_is_client_error() {
        let err = storage_upload_error(
            "ctx",
            StorageError::InvalidKey("Storage path must be relative: /x".to_string()),
        );
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn test_into_response_uses_variant_status() {
        let response = HttpAppError(AppError::PayloadTooLarge("too big".into())).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let response = HttpAppError(AppError::Configuration("missing".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    /// Verifies the public error response contract: `error` and `code` only.
    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse::new("No file uploaded", "INVALID_INPUT");
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["error"], "No file uploaded");
        assert_eq!(json["code"], "INVALID_INPUT");
        assert_eq!(json.as_object().map(|o| o.len()), Some(2));
    }
}
