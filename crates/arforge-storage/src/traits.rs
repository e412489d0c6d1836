//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StorageError {
    /// The underlying message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            StorageError::UploadFailed(msg)
            | StorageError::InvalidKey(msg)
            | StorageError::BackendError(msg)
            | StorageError::ConfigError(msg) => msg,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Per-upload options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    pub content_type: String,
    /// Replace an existing object at the same path instead of failing
    pub upsert: bool,
}

impl UploadOptions {
    /// Options for a create-only upload with the given content type.
    pub fn create_only(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            upsert: false,
        }
    }
}

/// Storage abstraction trait
///
/// The upload handlers only need two capabilities: put bytes at a path and
/// resolve the public URL for that path.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload `data` to `path` inside `bucket` and return the backend's object key.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Vec<u8>,
        options: &UploadOptions,
    ) -> StorageResult<String>;

    /// Publicly accessible URL for an object. Does not check that it exists.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}
