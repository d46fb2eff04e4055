//! Post entity for SeaORM.
//!
//! Category and subcategory references are plain columns without foreign
//! keys: a category can be deleted while posts still point at it.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::{Post, Thumbnail};
use quill_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub meta_description: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub thumbnail_url: Option<String>,
    pub thumbnail_file_id: Option<String>,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub sub_category_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl TryFrom<Model> for Post {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let tags: Vec<String> = serde_json::from_value(model.tags).map_err(|e| {
            tracing::error!(post_id = %model.id, error = %e, "Unreadable tags");
            RepoError::Query(format!("Unreadable tags for post {}: {e}", model.id))
        })?;

        let thumbnail = match (model.thumbnail_url, model.thumbnail_file_id) {
            (Some(url), Some(file_id)) => Some(Thumbnail { url, file_id }),
            _ => None,
        };

        Ok(Self {
            id: model.id,
            title: model.title,
            meta_description: model.meta_description,
            content: model.content,
            tags,
            thumbnail,
            author: model.author_id,
            category: model.category_id,
            sub_category: model.sub_category_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        let (thumbnail_url, thumbnail_file_id) = match post.thumbnail {
            Some(t) => (Some(t.url), Some(t.file_id)),
            None => (None, None),
        };

        Self {
            id: Set(post.id),
            title: Set(post.title),
            meta_description: Set(post.meta_description),
            content: Set(post.content),
            tags: Set(Json::from(post.tags)),
            thumbnail_url: Set(thumbnail_url),
            thumbnail_file_id: Set(thumbnail_file_id),
            author_id: Set(post.author),
            category_id: Set(post.category),
            sub_category_id: Set(post.sub_category),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
