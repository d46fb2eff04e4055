//! Category hierarchy operations.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Category, PopulatedPost, SubCategory};
use crate::error::{DomainError, RepoError};
use crate::ports::{CategoryRepository, PostRepository};
use crate::projection::{ProjectedPost, project_sub_categories};

/// Owns categories and their embedded subcategories, guarding subcategory
/// removal against posts that still reference it.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    posts: Arc<dyn PostRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { categories, posts }
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Please enter the category name"));
        }

        if self.categories.find_by_name(name).await?.is_some() {
            return Err(duplicate_category(name));
        }

        // The store's unique name constraint catches a concurrent create of
        // the same name that slipped past the lookup above.
        let category = self
            .categories
            .save(Category::new(name))
            .await
            .map_err(|e| match e {
                RepoError::Constraint(_) => duplicate_category(name),
                other => other.into(),
            })?;

        tracing::info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Delete a category. Posts filed under it are not checked and keep
    /// their (now dangling) reference.
    pub async fn delete_category(&self, id: Uuid) -> Result<(), DomainError> {
        self.categories.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("category", id),
            other => other.into(),
        })?;

        tracing::info!(category_id = %id, "Category deleted");
        Ok(())
    }

    pub async fn add_sub_category(
        &self,
        category_id: Uuid,
        name: &str,
    ) -> Result<Category, DomainError> {
        let mut category = self.get_category(category_id).await?;
        let sub_id = category.add_sub_category(name)?.id;

        let category = self.categories.save(category).await?;
        tracing::info!(
            category_id = %category.id,
            sub_category_id = %sub_id,
            "Subcategory added"
        );
        Ok(category)
    }

    /// Remove a subcategory unless a post still references it.
    ///
    /// The reference check and the save are two separate store calls with no
    /// lock in between: a post created against this subcategory after the
    /// check passes keeps a dangling reference.
    pub async fn delete_sub_category(
        &self,
        category_id: Uuid,
        sub_category_id: Uuid,
    ) -> Result<Category, DomainError> {
        let mut category = self.get_category(category_id).await?;
        if category.sub_category(sub_category_id).is_none() {
            return Err(DomainError::not_found("subcategory", sub_category_id));
        }

        let referencing = self
            .posts
            .count_by_sub_category(category_id, sub_category_id)
            .await?;
        if referencing > 0 {
            tracing::debug!(
                %category_id,
                %sub_category_id,
                referencing,
                "Subcategory deletion blocked"
            );
            return Err(DomainError::IntegrityViolation(format!(
                "Cannot delete subcategory. There are {referencing} post(s) associated with it."
            )));
        }

        category.remove_sub_category(sub_category_id);
        let category = self.categories.save(category).await?;

        tracing::info!(%category_id, %sub_category_id, "Subcategory deleted");
        Ok(category)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.categories.find_all().await?)
    }

    pub async fn get_category(&self, id: Uuid) -> Result<Category, DomainError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("category", id))
    }

    pub async fn get_category_by_name(&self, name: &str) -> Result<Category, DomainError> {
        self.categories
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::not_found("category", name))
    }

    /// Find a subcategory by its (case-insensitive) name within a category.
    pub async fn resolve_sub_category_by_name(
        &self,
        category_name: &str,
        sub_category_name: &str,
    ) -> Result<(Category, SubCategory), DomainError> {
        let category = self.get_category_by_name(category_name).await?;
        let sub_category = category
            .sub_category_by_name(sub_category_name)
            .cloned()
            .ok_or_else(|| DomainError::not_found("subcategory", sub_category_name))?;

        Ok((category, sub_category))
    }

    /// Posts filed under a subcategory, projected to their public shape.
    pub async fn posts_by_sub_category_name(
        &self,
        category_name: &str,
        sub_category_name: &str,
    ) -> Result<Vec<ProjectedPost>, DomainError> {
        let (category, sub_category) = self
            .resolve_sub_category_by_name(category_name, sub_category_name)
            .await?;

        let populated: Vec<PopulatedPost> = self
            .posts
            .find_by_sub_category(category.id, sub_category.id)
            .await?
            .into_iter()
            .map(|post| PopulatedPost {
                post,
                category: Some(category.clone()),
            })
            .collect();

        tracing::debug!(
            category = %category.name,
            sub_category = %sub_category.name,
            count = populated.len(),
            "Fetched posts by subcategory"
        );
        Ok(project_sub_categories(&populated))
    }
}

fn duplicate_category(name: &str) -> DomainError {
    DomainError::DuplicateName(format!("Category already exists with the name '{name}'"))
}
