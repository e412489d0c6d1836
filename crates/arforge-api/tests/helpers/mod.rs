//! Test helpers: build AppState and router for integration tests.
//!
//! Storage is an in-memory recorder, so no network or Supabase project is needed.
//! Run with `cargo test -p arforge-api`.

#![allow(dead_code)]

pub mod fixtures;

use arforge_api::setup::routes;
use arforge_api::state::AppState;
use arforge_core::{StorageSettings, UploadConfig};
use arforge_storage::{Storage, StorageError, StorageFactory, StorageResult, UploadOptions};
use async_trait::async_trait;
use axum_test::TestServer;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const TEST_STORAGE_URL: &str = "https://project.supabase.co";

/// One call to `Storage::upload`.
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub bucket: String,
    pub path: String,
    pub size: usize,
    pub options: UploadOptions,
}

/// Storage that records uploads and optionally fails them.
#[derive(Default)]
pub struct RecordingStorage {
    uploads: Mutex<Vec<RecordedUpload>>,
    failure: Option<String>,
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Vec<u8>,
        options: &UploadOptions,
    ) -> StorageResult<String> {
        self.uploads.lock().unwrap().push(RecordedUpload {
            bucket: bucket.to_string(),
            path: path.to_string(),
            size: data.len(),
            options: options.clone(),
        });
        match &self.failure {
            Some(message) => Err(StorageError::UploadFailed(message.clone())),
            None => Ok(format!("{}/{}", bucket, path)),
        }
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            TEST_STORAGE_URL, bucket, path
        )
    }
}

/// Factory handing out one shared `RecordingStorage` and counting connections.
#[derive(Default)]
pub struct RecordingFactory {
    storage: Arc<RecordingStorage>,
    connects: AtomicUsize,
}

impl RecordingFactory {
    pub fn failing(message: &str) -> Self {
        Self {
            storage: Arc::new(RecordingStorage {
                uploads: Mutex::new(Vec::new()),
                failure: Some(message.to_string()),
            }),
            connects: AtomicUsize::new(0),
        }
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.storage.uploads.lock().unwrap().clone()
    }
}

impl StorageFactory for RecordingFactory {
    fn connect(&self, _settings: &StorageSettings) -> StorageResult<Arc<dyn Storage>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(self.storage.clone())
    }
}

/// Test application: server plus the storage recorder behind it.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<RecordingFactory>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Environment for a configured (non-mock) deployment.
pub const STORAGE_ENV: &[(&str, &str)] = &[
    ("SUPABASE_URL", TEST_STORAGE_URL),
    ("SUPABASE_ANON_KEY", "anon-key"),
];

/// Environment for mock mode.
pub const MOCK_ENV: &[(&str, &str)] = &[("MOCK_UPLOADS", "true")];

pub fn test_config(vars: &[(&str, &str)]) -> UploadConfig {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    UploadConfig::from_lookup(|key| map.get(key).cloned()).expect("Invalid test configuration")
}

/// Setup test app with the given environment and a recording storage backend.
pub fn setup_test_app(vars: &[(&str, &str)]) -> TestApp {
    setup_test_app_with_storage(vars, RecordingFactory::default())
}

pub fn setup_test_app_with_storage(vars: &[(&str, &str)], factory: RecordingFactory) -> TestApp {
    let config = test_config(vars);
    let storage = Arc::new(factory);
    let state = Arc::new(AppState::new(config.clone(), storage.clone()));

    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, storage }
}
