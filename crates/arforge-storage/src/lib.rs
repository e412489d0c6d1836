//! ARForge Storage Library
//!
//! This crate provides the object storage abstraction used by the upload API
//! and its Supabase Storage implementation.
//!
//! # Storage key format
//!
//! Objects are addressed by `(bucket, path)`. Paths are relative, `/`-separated,
//! and must not contain `..`, a leading `/`, or empty segments. Validation and
//! URL encoding are centralized in the `keys` module so every backend agrees.

pub mod factory;
pub mod keys;
pub mod supabase;
pub mod traits;

// Re-export commonly used types
pub use factory::{StorageFactory, SupabaseStorageFactory};
pub use keys::{MIND_FILES_BUCKET, VIDEOS_BUCKET};
pub use supabase::SupabaseStorage;
pub use traits::{Storage, StorageError, StorageResult, UploadOptions};
