//! Data Transfer Objects - request types for the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSubCategoryRequest {
    pub name: String,
}

/// Tags as sent by clients: a JSON array, or that array encoded as a string
/// (form submissions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Encoded(String),
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid tags format")]
pub struct InvalidTags;

impl TagsInput {
    pub fn into_tags(self) -> Result<Vec<String>, InvalidTags> {
        match self {
            TagsInput::List(tags) => Ok(tags),
            TagsInput::Encoded(raw) => serde_json::from_str(&raw).map_err(|_| InvalidTags),
        }
    }
}

/// Request to create a post. `thumbnail` is a base64 `data:` URI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    pub meta_description: Option<String>,
    #[serde(default)]
    pub content: String,
    pub tags: Option<TagsInput>,
    pub category: Option<Uuid>,
    pub sub_category: Option<Uuid>,
    pub thumbnail: Option<String>,
    pub thumbnail_name: Option<String>,
}

/// Partial post update; absent fields stay as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub content: Option<String>,
    pub tags: Option<TagsInput>,
    pub thumbnail: Option<String>,
    pub thumbnail_name: Option<String>,
}
