//! ARForge Core Library
//!
//! This crate provides the configuration, error types, and response models
//! shared by the upload API and the billing client.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{StorageSettings, UploadConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
