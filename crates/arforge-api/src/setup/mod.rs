//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::Result;
use arforge_core::UploadConfig;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: UploadConfig) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        mock_uploads = config.mock_uploads,
        storage_configured = config.storage_settings().is_ok(),
        "Configuration loaded and validated successfully"
    );
    if !config.mock_uploads && config.storage_settings().is_err() {
        tracing::warn!(
            "Storage is not configured and mock uploads are off; uploads will fail until SUPABASE_URL and a key are set"
        );
    }

    let state = Arc::new(AppState::with_supabase(config.clone()));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
