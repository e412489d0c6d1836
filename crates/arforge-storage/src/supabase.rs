use crate::keys::{encode_key, validate_key};
use crate::traits::{Storage, StorageError, StorageResult, UploadOptions};
use arforge_core::StorageSettings;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Successful upload body: `{"Key": "bucket/path", "Id": "..."}`
#[derive(Debug, Deserialize)]
struct UploadResponseBody {
    #[serde(rename = "Key")]
    key: Option<String>,
}

/// Error body: `{"statusCode": "409", "error": "Duplicate", "message": "..."}`
#[derive(Debug, Deserialize)]
struct ErrorResponseBody {
    message: Option<String>,
    error: Option<String>,
}

/// Supabase Storage implementation
#[derive(Clone)]
pub struct SupabaseStorage {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl SupabaseStorage {
    /// Create a new SupabaseStorage instance
    ///
    /// # Arguments
    /// * `settings` - Project URL (e.g. "https://abc.supabase.co"), API key, and request timeout
    pub fn new(settings: &StorageSettings) -> StorageResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(SupabaseStorage {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.endpoint,
            bucket,
            encode_key(path)
        )
    }

    /// Pull the most specific message out of an error body.
    fn error_message(status: reqwest::StatusCode, body: &str) -> String {
        match serde_json::from_str::<ErrorResponseBody>(body) {
            Ok(ErrorResponseBody {
                message: Some(message),
                ..
            }) => message,
            Ok(ErrorResponseBody {
                error: Some(error),
                ..
            }) => error,
            _ if !body.trim().is_empty() => body.trim().to_string(),
            _ => format!("storage responded with status {}", status),
        }
    }
}

#[async_trait]
impl Storage for SupabaseStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Vec<u8>,
        options: &UploadOptions,
    ) -> StorageResult<String> {
        validate_key(path)?;

        let url = self.object_url(bucket, path);
        let size = data.len();
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .header("Content-Type", &options.content_type)
            .header("x-upsert", if options.upsert { "true" } else { "false" })
            .body(data)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    path = %path,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Storage request failed"
                );
                StorageError::BackendError(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        if !status.is_success() {
            let message = Self::error_message(status, &body);
            tracing::error!(
                status = status.as_u16(),
                error = %message,
                bucket = %bucket,
                path = %path,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Storage upload rejected"
            );
            return Err(StorageError::UploadFailed(message));
        }

        let key = serde_json::from_str::<UploadResponseBody>(&body)
            .ok()
            .and_then(|b| b.key)
            .unwrap_or_else(|| format!("{}/{}", bucket, path));

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Storage upload successful"
        );

        Ok(key)
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.endpoint,
            bucket,
            encode_key(path)
        )
    }
}
