//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{CategoryRepository, ImageStorage, PostRepository};
use quill_core::services::{CategoryService, PostService};
use quill_infra::{InMemoryCategoryRepository, InMemoryImageStorage, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use quill_infra::{DatabaseConnections, PostgresCategoryRepository, PostgresPostRepository};

#[cfg(feature = "imagekit")]
use quill_infra::ImageKitStorage;

use crate::config::AppConfig;

type Stores = (Arc<dyn PostRepository>, Arc<dyn CategoryRepository>);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub categories: CategoryService,
    pub posts_per_page: u64,
}

impl AppState {
    /// Build the application state, falling back to in-memory backends for
    /// anything that is not configured or not reachable.
    pub async fn new(config: &AppConfig) -> Self {
        let (posts, categories) = stores(config).await;
        let storage = image_storage(config);

        tracing::info!("Application state initialized");
        Self::from_parts(posts, categories, storage, config.posts_per_page)
    }

    pub fn from_parts(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        storage: Arc<dyn ImageStorage>,
        posts_per_page: u64,
    ) -> Self {
        Self {
            posts: PostService::new(posts.clone(), categories.clone(), storage),
            categories: CategoryService::new(categories, posts),
            posts_per_page,
        }
    }

    /// Fully in-memory state.
    #[cfg(test)]
    pub fn in_memory(posts_per_page: u64) -> Self {
        let (posts, categories) = in_memory_stores();
        Self::from_parts(
            posts,
            categories,
            Arc::new(InMemoryImageStorage::new()),
            posts_per_page,
        )
    }
}

fn in_memory_stores() -> Stores {
    (
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(InMemoryCategoryRepository::new()),
    )
}

#[cfg(feature = "postgres")]
async fn stores(config: &AppConfig) -> Stores {
    let Some(db_config) = &config.database else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return in_memory_stores();
    };

    match DatabaseConnections::init(db_config).await {
        Ok(connections) => (
            Arc::new(PostgresPostRepository::new(connections.main.clone())),
            Arc::new(PostgresCategoryRepository::new(connections.main)),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database. Using in-memory fallback.");
            in_memory_stores()
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn stores(_config: &AppConfig) -> Stores {
    tracing::info!("Running without postgres feature - using in-memory stores");
    in_memory_stores()
}

#[cfg(feature = "imagekit")]
fn image_storage(config: &AppConfig) -> Arc<dyn ImageStorage> {
    match &config.imagekit {
        Some(imagekit) => Arc::new(ImageKitStorage::new(imagekit.clone())),
        None => {
            tracing::warn!("IMAGEKIT_PRIVATE_KEY not set. Thumbnails are kept in memory.");
            Arc::new(InMemoryImageStorage::new())
        }
    }
}

#[cfg(not(feature = "imagekit"))]
fn image_storage(_config: &AppConfig) -> Arc<dyn ImageStorage> {
    tracing::info!("Running without imagekit feature - thumbnails are kept in memory");
    Arc::new(InMemoryImageStorage::new())
}
