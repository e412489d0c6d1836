//! Application state shared by the upload handlers.
//!
//! The state is immutable after startup: the validated configuration and the
//! factory used to open a storage client for each request.

use arforge_core::UploadConfig;
use arforge_storage::{StorageFactory, SupabaseStorageFactory};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: UploadConfig,
    pub storage: Arc<dyn StorageFactory>,
}

impl AppState {
    pub fn new(config: UploadConfig, storage: Arc<dyn StorageFactory>) -> Self {
        Self { config, storage }
    }

    /// State backed by Supabase Storage.
    pub fn with_supabase(config: UploadConfig) -> Self {
        Self::new(config, Arc::new(SupabaseStorageFactory))
    }
}
