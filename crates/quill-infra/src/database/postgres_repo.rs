//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use quill_core::domain::{Category, Post};
use quill_core::error::RepoError;
use quill_core::ports::{CategoryRepository, PostRepository, QueryableRepository};
use quill_core::query::{DocumentQuery, Predicate};

use super::condition::post_condition;
use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

#[async_trait]
impl QueryableRepository<Post> for PostgresPostRepository {
    async fn find_matching(&self, query: &DocumentQuery) -> Result<Vec<Post>, RepoError> {
        let mut select = PostEntity::find()
            .filter(post_condition(&query.predicate)?)
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id);

        if let Some(window) = query.window {
            select = select.offset(window.skip).limit(window.limit);
        }

        let result = select.all(&self.db).await.map_err(map_db_err)?;
        result.into_iter().map(Post::try_from).collect()
    }

    async fn count_matching(&self, predicate: &Predicate) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post_condition(predicate)?)
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn count_all(&self) -> Result<u64, RepoError> {
        PostEntity::find().count(&self.db).await.map_err(map_db_err)
    }
}

impl PostRepository for PostgresPostRepository {}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        result.into_iter().map(Category::try_from).collect()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        tracing::debug!(name, "Finding category by name");

        let result = CategoryEntity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        result.map(Category::try_from).transpose()
    }
}
