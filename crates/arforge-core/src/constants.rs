//! Upload constants shared by the handlers and configuration.

/// Required suffix for MindAR image-tracking target files.
pub const MIND_FILE_EXTENSION: &str = ".mind";

/// Payloads smaller than this cannot be a compiled tracking target.
pub const MIND_FILE_MIN_BYTES: usize = 1000;

/// Filename used in generated mind paths when the client sent none.
pub const MIND_FILE_DEFAULT_NAME: &str = "file.mind";

/// Filename used for mock video URLs when the client sent none.
pub const VIDEO_DEFAULT_NAME: &str = "video.mp4";

/// Content type recorded for every mind file upload.
pub const MIND_FILE_CONTENT_TYPE: &str = "application/octet-stream";

/// Video MIME types accepted by the video upload endpoint.
pub const VIDEO_ALLOWED_CONTENT_TYPES: &[&str] = &[
    "video/mp4",
    "video/webm",
    "video/ogg",
    "video/avi",
    "video/mov",
    "video/quicktime",
];

pub const DEFAULT_MAX_VIDEO_SIZE_MB: u64 = 100;
pub const DEFAULT_MOCK_UPLOAD_BASE_URL: &str = "https://mock.local/uploads";

pub const BYTES_PER_MB: u64 = 1024 * 1024;
