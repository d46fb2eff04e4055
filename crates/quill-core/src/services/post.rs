//! Post listing and lifecycle.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{NewPost, Post, PostUpdate, THUMBNAIL_FOLDER, Thumbnail};
use crate::error::{DomainError, RepoError};
use crate::ports::{CategoryRepository, ImageStorage, ImageUpload, PostRepository};
use crate::query::{QueryFeatures, QueryParams};

/// One page of the post listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub items: Vec<Post>,
    pub page_size: u64,
    pub current_page: u64,
    /// Posts matching search and filters, across all pages.
    pub filtered_count: u64,
    /// Size of the whole collection.
    pub total_count: u64,
    pub total_pages: u64,
}

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    storage: Arc<dyn ImageStorage>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        storage: Arc<dyn ImageStorage>,
    ) -> Self {
        Self {
            posts,
            categories,
            storage,
        }
    }

    /// Search, filter and paginate posts.
    pub async fn list_posts(
        &self,
        params: QueryParams,
        page_size: u64,
    ) -> Result<PostPage, DomainError> {
        let features = QueryFeatures::<Post>::new(params)
            .search()
            .filter()?
            .paginate(page_size)?;

        let filtered_count = features.count_matching(&*self.posts).await?;
        let items = features.execute(&*self.posts).await?;
        let total_count = self.posts.count_all().await?;

        tracing::debug!(
            filtered_count,
            total_count,
            page = features.current_page(),
            "Listed posts"
        );

        Ok(PostPage {
            items,
            page_size,
            current_page: features.current_page(),
            filtered_count,
            total_count,
            total_pages: filtered_count.div_ceil(page_size),
        })
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id))
    }

    /// Create a post. The thumbnail is uploaded first; if that fails nothing
    /// is persisted.
    pub async fn create_post(
        &self,
        author: Uuid,
        input: NewPost,
        image: ImageUpload,
    ) -> Result<Post, DomainError> {
        input.validate()?;
        self.check_category_reference(input.category, input.sub_category)
            .await?;

        let thumbnail = self
            .storage
            .upload(image.bytes, &image.file_name, THUMBNAIL_FOLDER)
            .await?;

        let post = match self.posts.save(Post::new(author, input, thumbnail.clone())).await {
            Ok(post) => post,
            Err(e) => {
                self.discard_upload(&thumbnail).await;
                return Err(e.into());
            }
        };

        tracing::info!(post_id = %post.id, author = %author, "Post created");
        Ok(post)
    }

    /// Update a post on behalf of its author.
    ///
    /// A replacement thumbnail is uploaded before the save and the old one is
    /// released after it. A failed release is returned as an error, but the
    /// saved post stays saved.
    pub async fn update_post(
        &self,
        actor: Uuid,
        id: Uuid,
        update: PostUpdate,
        image: Option<ImageUpload>,
    ) -> Result<Post, DomainError> {
        let mut post = self.get_post(id).await?;
        if !post.is_authored_by(actor) {
            return Err(DomainError::Unauthorized);
        }

        let update = update.normalized()?;
        if update.is_empty() && image.is_none() {
            return Err(DomainError::validation("No fields provided for update"));
        }

        let (uploaded, replaced) = match image {
            Some(image) => {
                let thumbnail = self
                    .storage
                    .upload(image.bytes, &image.file_name, THUMBNAIL_FOLDER)
                    .await?;
                let previous = post.thumbnail.replace(thumbnail.clone());
                (Some(thumbnail), previous)
            }
            None => (None, None),
        };

        post.apply(update);
        let post = match self.posts.save(post).await {
            Ok(post) => post,
            Err(e) => {
                if let Some(thumbnail) = &uploaded {
                    self.discard_upload(thumbnail).await;
                }
                return Err(e.into());
            }
        };
        tracing::info!(post_id = %post.id, "Post updated");

        if let Some(old) = replaced {
            self.release_thumbnail(&old).await?;
        }
        Ok(post)
    }

    /// Delete a post on behalf of its author, then release its thumbnail.
    pub async fn delete_post(&self, actor: Uuid, id: Uuid) -> Result<(), DomainError> {
        let post = self.get_post(id).await?;
        if !post.is_authored_by(actor) {
            return Err(DomainError::Unauthorized);
        }

        self.posts.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("post", id),
            other => other.into(),
        })?;
        tracing::info!(post_id = %id, "Post deleted");

        if let Some(thumbnail) = &post.thumbnail {
            self.release_thumbnail(thumbnail).await?;
        }
        Ok(())
    }

    async fn check_category_reference(
        &self,
        category_id: Option<Uuid>,
        sub_category_id: Option<Uuid>,
    ) -> Result<(), DomainError> {
        let Some(category_id) = category_id else {
            return Ok(());
        };

        let category = self
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| DomainError::not_found("category", category_id))?;

        if let Some(sub_id) = sub_category_id {
            if category.sub_category(sub_id).is_none() {
                return Err(DomainError::not_found("subcategory", sub_id));
            }
        }
        Ok(())
    }

    async fn release_thumbnail(&self, thumbnail: &Thumbnail) -> Result<(), DomainError> {
        self.storage.delete(&thumbnail.file_id).await.map_err(|e| {
            tracing::warn!(
                file_id = %thumbnail.file_id,
                error = %e,
                "Thumbnail release failed, stored image left behind"
            );
            DomainError::from(e)
        })
    }

    /// Best-effort cleanup of an image whose post was never saved.
    async fn discard_upload(&self, thumbnail: &Thumbnail) {
        if let Err(e) = self.storage.delete(&thumbnail.file_id).await {
            tracing::warn!(
                file_id = %thumbnail.file_id,
                error = %e,
                "Could not discard unused thumbnail"
            );
        }
    }
}
