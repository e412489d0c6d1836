use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for a stored (or mocked) mind file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MindUploadResponse {
    pub success: bool,
    /// Public URL of the uploaded file
    pub url: String,
    /// Storage path inside the `mind-files` bucket
    pub path: String,
}

impl MindUploadResponse {
    pub fn new(url: String, path: String) -> Self {
        Self {
            success: true,
            url,
            path,
        }
    }
}

/// Response for a stored (or mocked) video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VideoUploadResponse {
    pub success: bool,
    /// Public URL of the uploaded video
    pub url: String,
}

impl VideoUploadResponse {
    pub fn new(url: String) -> Self {
        Self { success: true, url }
    }
}
