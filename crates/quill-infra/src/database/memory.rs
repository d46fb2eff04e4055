//! In-memory stores - used when no database is configured.
//!
//! Documents are kept in insertion order, which is the natural order the
//! query pipeline reports. Data is lost on process restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Category, Post};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, CategoryRepository, PostRepository, QueryableRepository};
use quill_core::query::{Document, DocumentQuery, Predicate};

/// A document kept by an [`InMemoryCollection`].
pub trait StoredDocument: Clone + Send + Sync + 'static {
    fn key(&self) -> Uuid;

    /// Unique-index check: whether `self` may not coexist with `other`.
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }
}

impl StoredDocument for Post {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl StoredDocument for Category {
    fn key(&self) -> Uuid {
        self.id
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.id != other.id && self.name == other.name
    }
}

/// A single collection of documents behind an async `RwLock`.
pub struct InMemoryCollection<T> {
    documents: RwLock<Vec<T>>,
}

impl<T> InMemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for InMemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory post repository.
pub type InMemoryPostRepository = InMemoryCollection<Post>;

/// In-memory category repository.
pub type InMemoryCategoryRepository = InMemoryCollection<Category>;

#[async_trait]
impl<T: StoredDocument> BaseRepository<T, Uuid> for InMemoryCollection<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|d| d.key() == id).cloned())
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        let mut documents = self.documents.write().await;

        if documents.iter().any(|d| entity.conflicts_with(d)) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        match documents.iter_mut().find(|d| d.key() == entity.key()) {
            Some(existing) => *existing = entity.clone(),
            None => documents.push(entity.clone()),
        }
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut documents = self.documents.write().await;
        let index = documents
            .iter()
            .position(|d| d.key() == id)
            .ok_or(RepoError::NotFound)?;
        documents.remove(index);
        Ok(())
    }
}

#[async_trait]
impl<T: StoredDocument + Document> QueryableRepository<T> for InMemoryCollection<T> {
    async fn find_matching(&self, query: &DocumentQuery) -> Result<Vec<T>, RepoError> {
        let documents = self.documents.read().await;
        let matching = documents.iter().filter(|d| query.predicate.matches(*d));

        let found: Vec<T> = match query.window {
            Some(window) => matching
                .skip(usize::try_from(window.skip).unwrap_or(usize::MAX))
                .take(usize::try_from(window.limit).unwrap_or(usize::MAX))
                .cloned()
                .collect(),
            None => matching.cloned().collect(),
        };

        tracing::debug!(
            conditions = query.predicate.conditions().len(),
            found = found.len(),
            "In-memory query"
        );
        Ok(found)
    }

    async fn count_matching(&self, predicate: &Predicate) -> Result<u64, RepoError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().filter(|d| predicate.matches(*d)).count() as u64)
    }

    async fn count_all(&self) -> Result<u64, RepoError> {
        Ok(self.documents.read().await.len() as u64)
    }
}

impl PostRepository for InMemoryPostRepository {}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, RepoError> {
        Ok(self.documents.read().await.clone())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|c| c.name == name).cloned())
    }
}
