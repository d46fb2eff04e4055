//! In-memory image storage for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::Thumbnail;
use quill_core::ports::{ImageStorage, StorageError};

/// Keeps uploaded images in a map keyed by file id.
#[derive(Default)]
pub struct InMemoryImageStorage {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryImageStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, file_id: &str) -> bool {
        self.files.read().await.contains_key(file_id)
    }

    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.files.read().await.is_empty()
    }
}

#[async_trait]
impl ImageStorage for InMemoryImageStorage {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        folder: &str,
    ) -> Result<Thumbnail, StorageError> {
        if bytes.is_empty() {
            return Err(StorageError::Upload("Empty image".to_string()));
        }

        let file_id = Uuid::new_v4().simple().to_string();
        let url = format!("memory://{folder}/{file_id}/{file_name}");
        self.files.write().await.insert(file_id.clone(), bytes);

        tracing::debug!(%file_id, folder, "Stored image in memory");
        Ok(Thumbnail { url, file_id })
    }

    async fn delete(&self, file_id: &str) -> Result<(), StorageError> {
        self.files
            .write()
            .await
            .remove(file_id)
            .map(|_| ())
            .ok_or_else(|| StorageError::Delete(format!("No such file: {file_id}")))
    }
}
