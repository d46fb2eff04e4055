//! Image storage port - where post thumbnails live.

use async_trait::async_trait;

use crate::domain::Thumbnail;

/// An image handed over by the transport layer for upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

/// Image storage trait - abstraction over external object storage.
///
/// Calls are not retried; a failure is terminal for the operation that issued it.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Store an image under the given folder.
    async fn upload(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        folder: &str,
    ) -> Result<Thumbnail, StorageError>;

    /// Delete a stored image by its file id.
    async fn delete(&self, file_id: &str) -> Result<(), StorageError>;
}

/// Image storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Delete failed: {0}")]
    Delete(String),

    #[error("Connection failed: {0}")]
    Connection(String),
}
