use crate::{Storage, StorageResult, SupabaseStorage};
use arforge_core::StorageSettings;
use std::sync::Arc;

/// Builds a storage client for one request from resolved settings.
///
/// Handlers hold a factory rather than a client so that missing configuration
/// is detected per request and tests can substitute an in-memory backend.
pub trait StorageFactory: Send + Sync {
    fn connect(&self, settings: &StorageSettings) -> StorageResult<Arc<dyn Storage>>;
}

/// Factory producing a fresh Supabase Storage client on every call
#[derive(Clone, Copy, Debug, Default)]
pub struct SupabaseStorageFactory;

impl StorageFactory for SupabaseStorageFactory {
    fn connect(&self, settings: &StorageSettings) -> StorageResult<Arc<dyn Storage>> {
        let storage = SupabaseStorage::new(settings)?;
        Ok(Arc::new(storage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_supabase_factory_builds_client() {
        let settings = StorageSettings {
            endpoint: "https://abc.supabase.co".to_string(),
            api_key: "key".to_string(),
            timeout: Duration::from_secs(10),
        };
        let storage = SupabaseStorageFactory.connect(&settings).unwrap();
        assert_eq!(
            storage.public_url("videos", "clip.mp4"),
            "https://abc.supabase.co/storage/v1/object/public/videos/clip.mp4"
        );
    }
}
