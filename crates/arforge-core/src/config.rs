//! Configuration module
//!
//! This module provides the configuration structures for the upload API: server
//! settings, mock mode, Supabase storage credentials, and upload limits.
//!
//! Configuration is read once at startup and injected into handlers through the
//! application state. Handlers never consult the process environment directly.

use std::env;
use std::time::Duration;

use crate::constants::{BYTES_PER_MB, DEFAULT_MAX_VIDEO_SIZE_MB, DEFAULT_MOCK_UPLOAD_BASE_URL};
use crate::error::AppError;

// Common constants
const SERVER_PORT: u16 = 3000;
const STORAGE_TIMEOUT_SECS: u64 = 60;

/// Message returned when storage credentials are missing outside mock mode.
pub const STORAGE_CONFIG_MISSING: &str = "Supabase configuration missing. Set SUPABASE_URL and SUPABASE_ANON_KEY (or SUPABASE_SERVICE_ROLE_KEY).";

/// Output format for the tracing subscriber
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Server settings independent of the upload workflow
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub log_format: LogFormat,
}

/// Upload API configuration
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub base: BaseConfig,
    /// Skip storage entirely and fabricate URLs
    pub mock_uploads: bool,
    pub mock_upload_base_url: String,
    pub supabase_url: Option<String>,
    /// Service-role key when available, otherwise the public anon key
    pub supabase_key: Option<String>,
    pub max_video_size_mb: u64,
    pub storage_timeout_secs: u64,
}

/// Resolved storage endpoint and credential for one upload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageSettings {
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl UploadConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = get("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let log_format = match get("LOG_FORMAT").map(|s| s.to_lowercase()).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let base = BaseConfig {
            server_port: get("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            log_format,
        };

        let mock_uploads = get("MOCK_UPLOADS")
            .map(|v| {
                let v = v.trim().to_lowercase();
                v == "1" || v == "true"
            })
            .unwrap_or(false);

        let config = UploadConfig {
            base,
            mock_uploads,
            mock_upload_base_url: get("MOCK_UPLOAD_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_MOCK_UPLOAD_BASE_URL.to_string()),
            supabase_url: get("SUPABASE_URL").or_else(|| get("NEXT_PUBLIC_SUPABASE_URL")),
            supabase_key: get("SUPABASE_SERVICE_ROLE_KEY")
                .or_else(|| get("SUPABASE_ANON_KEY"))
                .or_else(|| get("NEXT_PUBLIC_SUPABASE_ANON_KEY")),
            max_video_size_mb: get("MAX_FILE_SIZE_MB")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_MAX_VIDEO_SIZE_MB),
            storage_timeout_secs: get("STORAGE_TIMEOUT_SECONDS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(STORAGE_TIMEOUT_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_video_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than zero"));
        }

        if let Some(ref url) = self.supabase_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow::anyhow!(
                    "SUPABASE_URL must be an http(s) URL, got '{}'",
                    url
                ));
            }
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.base.environment)
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.base.log_format
    }

    pub fn max_video_size_bytes(&self) -> u64 {
        self.max_video_size_mb.saturating_mul(BYTES_PER_MB)
    }

    /// Storage endpoint and credential, or a configuration error naming what is missing.
    pub fn storage_settings(&self) -> Result<StorageSettings, AppError> {
        match (self.supabase_url.as_deref(), self.supabase_key.as_deref()) {
            (Some(endpoint), Some(api_key)) => Ok(StorageSettings {
                endpoint: endpoint.trim_end_matches('/').to_string(),
                api_key: api_key.to_string(),
                timeout: Duration::from_secs(self.storage_timeout_secs),
            }),
            _ => Err(AppError::Configuration(STORAGE_CONFIG_MISSING.to_string())),
        }
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}
