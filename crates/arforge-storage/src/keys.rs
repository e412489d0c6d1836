//! Shared key validation and encoding for storage backends.

use crate::traits::{StorageError, StorageResult};

/// Bucket holding compiled MindAR tracking targets.
pub const MIND_FILES_BUCKET: &str = "mind-files";

/// Bucket holding demo videos.
pub const VIDEOS_BUCKET: &str = "videos";

/// Reject paths that could escape the bucket or address nothing.
pub fn validate_key(path: &str) -> StorageResult<()> {
    if path.is_empty() {
        return Err(StorageError::InvalidKey("Storage path is empty".to_string()));
    }
    if path.starts_with('/') {
        return Err(StorageError::InvalidKey(format!(
            "Storage path must be relative: {}",
            path
        )));
    }
    if path.split('/').any(|segment| segment.is_empty() || segment == "..") {
        return Err(StorageError::InvalidKey(format!(
            "Storage path contains an empty or parent segment: {}",
            path
        )));
    }
    Ok(())
}

/// Percent-encode each path segment, keeping the `/` separators.
pub fn encode_key(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
