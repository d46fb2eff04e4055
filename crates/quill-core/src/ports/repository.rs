use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Post};
use crate::error::RepoError;
use crate::query::{DocumentQuery, Predicate};

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` if absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// A collection the query pipeline can run against.
#[async_trait]
pub trait QueryableRepository<T>: Send + Sync {
    /// Documents matching the predicate, windowed if the query carries a window.
    /// Results come in natural (insertion) order.
    async fn find_matching(&self, query: &DocumentQuery) -> Result<Vec<T>, RepoError>;

    /// Number of documents matching the predicate.
    async fn count_matching(&self, predicate: &Predicate) -> Result<u64, RepoError>;

    /// Size of the whole collection.
    async fn count_all(&self) -> Result<u64, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> + QueryableRepository<Post> {
    /// Posts filed under the given subcategory of the given category.
    async fn find_by_sub_category(
        &self,
        category_id: Uuid,
        sub_category_id: Uuid,
    ) -> Result<Vec<Post>, RepoError> {
        let query = DocumentQuery::matching(Post::sub_category_predicate(
            category_id,
            sub_category_id,
        ));
        self.find_matching(&query).await
    }

    /// Number of posts referencing the given subcategory.
    async fn count_by_sub_category(
        &self,
        category_id: Uuid,
        sub_category_id: Uuid,
    ) -> Result<u64, RepoError> {
        let predicate = Post::sub_category_predicate(category_id, sub_category_id);
        self.count_matching(&predicate).await
    }
}

/// Category repository. Category names are unique: saving a second category
/// under an existing name fails with `RepoError::Constraint`.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    /// All categories, oldest first.
    async fn find_all(&self) -> Result<Vec<Category>, RepoError>;

    /// Find a category by its exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError>;
}
