//! Common utilities for file upload handlers

use arforge_core::constants::{BYTES_PER_MB, MIND_FILE_CONTENT_TYPE};
use arforge_core::AppError;
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;

/// The `file` part of an upload form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub data: Vec<u8>,
    /// Filename from the part's content disposition, if the client sent one
    pub filename: Option<String>,
    /// Declared content type of the part, if any
    pub content_type: Option<String>,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Filename with empty values treated as absent.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref().filter(|name| !name.is_empty())
    }

    /// Declared content type, or `application/octet-stream` when absent.
    pub fn content_type(&self) -> &str {
        self.content_type
            .as_deref()
            .filter(|ct| !ct.is_empty())
            .unwrap_or(MIND_FILE_CONTENT_TYPE)
    }
}

/// Fields read from an upload form. Unknown fields are ignored.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    /// Optional destination path (mind uploads only)
    pub path: Option<String>,
}

impl UploadForm {
    /// The `path` field when present and non-empty.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}

/// Map a multipart read failure. Bodies cut off by the request size limit
/// surface as 413, everything else is a malformed request.
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{}: {}", context, err.body_text()))
    } else {
        AppError::InvalidInput(format!("{}: {}", context, err.body_text()))
    }
}

/// Read the `file` and `path` fields from a multipart form.
/// When several fields are named "file" the first one wins; later ones are skipped.
pub async fn extract_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read multipart", e))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                if form.file.is_some() {
                    continue;
                }
                let filename = field.file_name().map(|s: &str| s.to_string());
                let content_type = field.content_type().map(|s: &str| s.to_string());

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Failed to read file data", e))?;

                form.file = Some(UploadedFile {
                    data: data.to_vec(),
                    filename,
                    content_type,
                });
            }
            "path" => {
                let path = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("Failed to read path field", e))?;
                form.path = Some(path);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Replace every character outside `[A-Za-z0-9._/-]` with `_`.
pub fn sanitize_path(path: &str) -> String {
    path.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '/' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Normalize MIME type by stripping parameters (e.g. "video/mp4; codecs=avc1" -> "video/mp4").
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Validate content type against allowlist. Parameters and case are ignored;
/// the bare type must then equal an allowed entry exactly.
pub fn is_allowed_content_type(content_type: &str, allowed_types: &[&str]) -> bool {
    let normalized = normalize_mime_type(content_type);
    allowed_types.iter().any(|ct| normalized == *ct)
}

/// Milliseconds since the Unix epoch, used to prefix generated object names.
pub fn unix_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Byte count in megabytes, one decimal place.
pub fn format_mb(bytes: usize) -> String {
    format!("{:.1}", bytes as f64 / BYTES_PER_MB as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path_keeps_separators() {
        assert_eq!(sanitize_path("user 1/target (final).mind"), "user_1/target__final_.mind");
        assert_eq!(sanitize_path("test.mind"), "test.mind");
        assert_eq!(sanitize_path("ümlaut.mind"), "_mlaut.mind");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in ["a b/c?d.mind", "../../etc/passwd", "clip #1.mov", ""] {
            let once = sanitize_path(input);
            assert_eq!(sanitize_path(&once), once);
            let once = sanitize_filename(input);
            assert_eq!(sanitize_filename(&once), once);
        }
    }

    #[test]
    fn test_sanitize_filename_replaces_slashes() {
        assert_eq!(sanitize_filename("clips/demo reel.mp4"), "clips_demo_reel.mp4");
    }

    #[test]
    fn test_normalize_mime_type() {
        assert_eq!(normalize_mime_type("video/MP4; codecs=avc1"), "video/mp4");
        assert_eq!(normalize_mime_type("video/webm"), "video/webm");
    }

    #[test]
    fn test_is_allowed_content_type() {
        let allowed = ["video/mp4", "video/quicktime"];
        assert!(is_allowed_content_type("video/mp4", &allowed));
        assert!(is_allowed_content_type("Video/QuickTime; x=1", &allowed));
        assert!(!is_allowed_content_type("video/x-matroska", &allowed));
        assert!(!is_allowed_content_type("video/mp4x", &allowed));
        assert!(!is_allowed_content_type("video/mp", &allowed));
        assert!(!is_allowed_content_type("", &allowed));
    }

    #[test]
    fn test_format_mb() {
        assert_eq!(format_mb(5 * 1024 * 1024), "5.0");
        assert_eq!(format_mb(1024 * 1024 + 512 * 1024), "1.5");
    }

    #[test]
    fn test_uploaded_file_defaults() {
        let file = UploadedFile {
            data: vec![0; 4],
            filename: Some(String::new()),
            content_type: None,
        };
        assert_eq!(file.size(), 4);
        assert_eq!(file.filename(), None);
        assert_eq!(file.content_type(), "application/octet-stream");
    }
}
