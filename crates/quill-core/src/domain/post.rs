use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Category;
use crate::error::DomainError;
use crate::query::{Condition, Document, FieldKind, FieldValue, Predicate};

/// Storage folder for post thumbnails.
pub const THUMBNAIL_FOLDER: &str = "blog-thumbnails";

/// Reference to an image held by the external image storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    /// Public URL of the stored image.
    pub url: String,
    /// Handle used to delete the stored image.
    pub file_id: String,
}

/// Post entity - a blog post written by an admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub meta_description: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    pub thumbnail: Option<Thumbnail>,
    pub author: Uuid,
    pub category: Option<Uuid>,
    pub sub_category: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields submitted when creating a post.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub meta_description: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    pub category: Option<Uuid>,
    pub sub_category: Option<Uuid>,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() || self.tags.is_empty()
        {
            return Err(DomainError::validation(
                "All required fields must be filled",
            ));
        }
        if self.sub_category.is_some() && self.category.is_none() {
            return Err(DomainError::validation(
                "A subcategory can only be set together with its category",
            ));
        }
        Ok(())
    }
}

/// Partial update of a post. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostUpdate {
    /// Drop blank text fields, which count as "not provided".
    pub fn normalized(self) -> Result<Self, DomainError> {
        fn non_blank(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        if matches!(&self.tags, Some(tags) if tags.is_empty()) {
            return Err(DomainError::validation("Tags must not be empty"));
        }

        Ok(Self {
            title: non_blank(self.title),
            meta_description: non_blank(self.meta_description),
            content: non_blank(self.content),
            tags: self.tags,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.meta_description.is_none()
            && self.content.is_none()
            && self.tags.is_none()
    }
}

impl Post {
    /// Create a new post from validated input.
    pub fn new(author: Uuid, input: NewPost, thumbnail: Thumbnail) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            meta_description: input.meta_description,
            content: input.content,
            tags: input.tags,
            thumbnail: Some(thumbnail),
            author,
            category: input.category,
            sub_category: input.sub_category,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_authored_by(&self, admin_id: Uuid) -> bool {
        self.author == admin_id
    }

    pub fn apply(&mut self, update: PostUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(meta_description) = update.meta_description {
            self.meta_description = Some(meta_description);
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        self.updated_at = Utc::now();
    }

    /// Predicate selecting posts filed under the given subcategory.
    pub fn sub_category_predicate(category_id: Uuid, sub_category_id: Uuid) -> Predicate {
        Predicate::all([
            Condition::eq("category", FieldValue::Uuid(category_id)),
            Condition::eq("subCategory", FieldValue::Uuid(sub_category_id)),
        ])
    }
}

impl Document for Post {
    const SEARCH_FIELD: &'static str = "title";

    fn field_kind(name: &str) -> Option<FieldKind> {
        match name {
            "title" | "metaDescription" | "tags" => Some(FieldKind::Text),
            "author" | "category" | "subCategory" => Some(FieldKind::Uuid),
            "createdAt" | "updatedAt" => Some(FieldKind::Timestamp),
            _ => None,
        }
    }

    fn is_list(name: &str) -> bool {
        name == "tags"
    }

    fn field(&self, name: &str) -> Vec<FieldValue> {
        match name {
            "title" => vec![FieldValue::Text(self.title.clone())],
            "metaDescription" => self
                .meta_description
                .iter()
                .map(|m| FieldValue::Text(m.clone()))
                .collect(),
            "tags" => self
                .tags
                .iter()
                .map(|t| FieldValue::Text(t.clone()))
                .collect(),
            "author" => vec![FieldValue::Uuid(self.author)],
            "category" => self.category.map(FieldValue::Uuid).into_iter().collect(),
            "subCategory" => self.sub_category.map(FieldValue::Uuid).into_iter().collect(),
            "createdAt" => vec![FieldValue::Timestamp(self.created_at)],
            "updatedAt" => vec![FieldValue::Timestamp(self.updated_at)],
            _ => Vec::new(),
        }
    }
}

/// A post whose category reference has been resolved to the full record.
#[derive(Debug, Clone)]
pub struct PopulatedPost {
    pub post: Post,
    pub category: Option<Category>,
}
