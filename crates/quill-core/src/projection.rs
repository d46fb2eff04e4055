//! Read-time projection of populated posts into their public shape.
//!
//! A populated post carries its whole category, subcategory list included.
//! The public shape names the subcategory instead and drops the list.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Category, PopulatedPost, Thumbnail};

/// Category as it appears nested inside a projected post.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Category> for CategorySummary {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedPost {
    pub id: Uuid,
    pub title: String,
    pub meta_description: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    pub thumbnail: Option<Thumbnail>,
    pub author: Uuid,
    pub category: Option<CategorySummary>,
    /// Subcategory name, `null` when the stored id is not in the category.
    pub sub_category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Resolve each post's subcategory id to its name.
///
/// An id missing from the hydrated category yields `sub_category: None`
/// rather than an error; the orphaned reference is logged.
pub fn project_sub_categories(posts: &[PopulatedPost]) -> Vec<ProjectedPost> {
    posts.iter().map(project).collect()
}

fn project(populated: &PopulatedPost) -> ProjectedPost {
    let post = &populated.post;
    let sub_category = match (&populated.category, post.sub_category) {
        (Some(category), Some(sub_id)) => {
            let name = category.sub_category(sub_id).map(|sub| sub.name.clone());
            if name.is_none() {
                tracing::warn!(
                    post_id = %post.id,
                    category_id = %category.id,
                    sub_category_id = %sub_id,
                    "Post references a subcategory missing from its category"
                );
            }
            name
        }
        _ => None,
    };

    ProjectedPost {
        id: post.id,
        title: post.title.clone(),
        meta_description: post.meta_description.clone(),
        content: post.content.clone(),
        tags: post.tags.clone(),
        thumbnail: post.thumbnail.clone(),
        author: post.author,
        category: populated.category.as_ref().map(CategorySummary::from),
        sub_category,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewPost, Post};

    fn post_in(category: &Category, sub_category: Option<Uuid>) -> Post {
        let thumbnail = Thumbnail {
            url: "https://img/p.png".to_string(),
            file_id: "file-1".to_string(),
        };
        let input = NewPost {
            title: "Title".to_string(),
            content: "Body".to_string(),
            tags: vec!["t".to_string()],
            category: Some(category.id),
            sub_category,
            ..Default::default()
        };
        Post::new(Uuid::new_v4(), input, thumbnail)
    }

    fn tech() -> Category {
        let mut category = Category::new("Tech");
        category.add_sub_category("Rust").unwrap();
        category.add_sub_category("Go").unwrap();
        category
    }

    #[test]
    fn test_resolves_sub_category_name() {
        let category = tech();
        let go = category.sub_categories[1].id;
        let populated = vec![PopulatedPost {
            post: post_in(&category, Some(go)),
            category: Some(category.clone()),
        }];

        let projected = project_sub_categories(&populated);
        assert_eq!(projected[0].sub_category.as_deref(), Some("Go"));
        assert_eq!(projected[0].category.as_ref().unwrap().name, "Tech");
    }

    #[test]
    fn test_unknown_sub_category_becomes_null() {
        let category = tech();
        let populated = vec![PopulatedPost {
            post: post_in(&category, Some(Uuid::new_v4())),
            category: Some(category.clone()),
        }];

        let projected = project_sub_categories(&populated);
        assert_eq!(projected[0].sub_category, None);

        let json = serde_json::to_value(&projected[0]).unwrap();
        assert!(json["subCategory"].is_null());
    }

    #[test]
    fn test_output_never_carries_sub_category_list() {
        let category = tech();
        let rust = category.sub_categories[0].id;
        let populated = vec![
            PopulatedPost {
                post: post_in(&category, Some(rust)),
                category: Some(category.clone()),
            },
            PopulatedPost {
                post: post_in(&category, Some(Uuid::new_v4())),
                category: Some(category.clone()),
            },
        ];

        for projected in project_sub_categories(&populated) {
            let json = serde_json::to_value(&projected).unwrap();
            let nested = json["category"].as_object().unwrap();
            assert!(!nested.contains_key("subCategory"));
            assert!(nested.contains_key("name"));
        }
    }

    #[test]
    fn test_input_is_left_untouched() {
        let category = tech();
        let rust = category.sub_categories[0].id;
        let populated = vec![PopulatedPost {
            post: post_in(&category, Some(rust)),
            category: Some(category.clone()),
        }];

        project_sub_categories(&populated);
        assert_eq!(populated[0].post.sub_category, Some(rust));
        assert_eq!(
            populated[0].category.as_ref().unwrap().sub_categories.len(),
            2
        );
    }
}
