//! ImageKit-backed thumbnail storage.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::multipart::Form;
use serde::Deserialize;

use quill_core::domain::Thumbnail;
use quill_core::ports::{ImageStorage, StorageError};

const DEFAULT_UPLOAD_URL: &str = "https://upload.imagekit.io/api/v1/files/upload";
const DEFAULT_API_URL: &str = "https://api.imagekit.io/v1";

/// ImageKit credentials and endpoints.
#[derive(Clone)]
pub struct ImageKitConfig {
    pub private_key: String,
    pub upload_url: String,
    pub api_url: String,
}

impl ImageKitConfig {
    /// Read `IMAGEKIT_PRIVATE_KEY` plus optional endpoint overrides.
    ///
    /// Returns `None` when no private key is set.
    pub fn from_env() -> Option<Self> {
        let private_key = std::env::var("IMAGEKIT_PRIVATE_KEY").ok()?;
        Some(Self {
            private_key,
            upload_url: std::env::var("IMAGEKIT_UPLOAD_URL")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_URL.to_string()),
            api_url: std::env::var("IMAGEKIT_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        })
    }
}

impl std::fmt::Debug for ImageKitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageKitConfig")
            .field("private_key", &"***")
            .field("upload_url", &self.upload_url)
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    file_id: String,
    url: String,
}

/// Stores thumbnails on ImageKit. Requests are not retried.
pub struct ImageKitStorage {
    client: reqwest::Client,
    config: ImageKitConfig,
}

impl ImageKitStorage {
    pub fn new(config: ImageKitConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

fn connection_error(err: reqwest::Error) -> StorageError {
    StorageError::Connection(err.to_string())
}

#[async_trait]
impl ImageStorage for ImageKitStorage {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        folder: &str,
    ) -> Result<Thumbnail, StorageError> {
        let form = Form::new()
            .text("file", STANDARD.encode(&bytes))
            .text("fileName", file_name.to_string())
            .text("folder", folder.to_string());

        let response = self
            .client
            .post(&self.config.upload_url)
            .basic_auth(&self.config.private_key, Some(""))
            .multipart(form)
            .send()
            .await
            .map_err(connection_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body, "ImageKit upload rejected");
            return Err(StorageError::Upload(format!("ImageKit returned {status}")));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        tracing::debug!(file_id = %uploaded.file_id, folder, "Image uploaded");
        Ok(Thumbnail {
            url: uploaded.url,
            file_id: uploaded.file_id,
        })
    }

    async fn delete(&self, file_id: &str) -> Result<(), StorageError> {
        let url = format!("{}/files/{}", self.config.api_url, file_id);
        let response = self
            .client
            .delete(&url)
            .basic_auth(&self.config.private_key, Some(""))
            .send()
            .await
            .map_err(connection_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Delete(format!(
                "ImageKit returned {status} for {file_id}"
            )));
        }

        tracing::debug!(%file_id, "Image deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_private_key() {
        let config = ImageKitConfig {
            private_key: "private_secret".to_string(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("private_secret"));
        assert!(printed.contains("upload.imagekit.io"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        let storage = ImageKitStorage::new(ImageKitConfig {
            private_key: "key".to_string(),
            upload_url: "http://127.0.0.1:9/upload".to_string(),
            api_url: "http://127.0.0.1:9".to_string(),
        });

        let result = storage.delete("file").await;
        assert!(matches!(result, Err(StorageError::Connection(_))));
    }
}
