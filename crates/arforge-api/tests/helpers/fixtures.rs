//! Test fixtures: multipart forms with payloads of a given size.

use axum_test::multipart::{MultipartForm, Part};

/// Deterministic filler bytes of the requested length.
pub fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// A `file` part with the given size, filename, and MIME type.
pub fn file_part(len: usize, file_name: &str, mime_type: &str) -> Part {
    Part::bytes(bytes::Bytes::from(payload(len)))
        .file_name(file_name.to_string())
        .mime_type(mime_type.to_string())
}

/// Form with a mind file and an optional `path` field.
pub fn mind_form(len: usize, file_name: &str, path: Option<&str>) -> MultipartForm {
    let form =
        MultipartForm::new().add_part("file", file_part(len, file_name, "application/octet-stream"));
    match path {
        Some(path) => form.add_text("path", path.to_string()),
        None => form,
    }
}

pub fn video_form(len: usize, file_name: &str, mime_type: &str) -> MultipartForm {
    MultipartForm::new().add_part("file", file_part(len, file_name, mime_type))
}
