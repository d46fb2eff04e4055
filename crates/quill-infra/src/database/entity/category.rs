//! Category entity for SeaORM. Subcategories live in a JSONB column.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::{Category, SubCategory};
use quill_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub sub_categories: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A row whose subcategory column cannot be decoded is an error. Reading it
/// as empty would let the next save overwrite the stored list.
impl TryFrom<Model> for Category {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let sub_categories: Vec<SubCategory> = serde_json::from_value(model.sub_categories)
            .map_err(|e| {
                tracing::error!(category_id = %model.id, error = %e, "Unreadable subcategories");
                RepoError::Query(format!(
                    "Unreadable subcategories for category {}: {e}",
                    model.id
                ))
            })?;

        Ok(Self {
            id: model.id,
            name: model.name,
            sub_categories,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

impl From<Category> for ActiveModel {
    fn from(category: Category) -> Self {
        let sub_categories =
            serde_json::to_value(&category.sub_categories).unwrap_or(Json::Array(Vec::new()));

        Self {
            id: Set(category.id),
            name: Set(category.name),
            sub_categories: Set(sub_categories),
            created_at: Set(category.created_at.into()),
            updated_at: Set(category.updated_at.into()),
        }
    }
}
