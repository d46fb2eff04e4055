use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// A named child grouping owned by exactly one category.
///
/// Subcategories have no identity outside their parent's list, so they are
/// modelled as a value nested in the [`Category`] aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: Uuid,
    pub name: String,
}

impl SubCategory {
    fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

/// Category entity - groups posts and owns an ordered list of subcategories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "subCategory")]
    pub sub_categories: Vec<SubCategory>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category with no subcategories. The name is trimmed.
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            sub_categories: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn sub_category(&self, id: Uuid) -> Option<&SubCategory> {
        self.sub_categories.iter().find(|sub| sub.id == id)
    }

    /// Case-insensitive lookup of a subcategory by name.
    pub fn sub_category_by_name(&self, name: &str) -> Option<&SubCategory> {
        let wanted = name.to_lowercase();
        self.sub_categories
            .iter()
            .find(|sub| sub.name.to_lowercase() == wanted)
    }

    /// Append a subcategory, generating its id.
    pub fn add_sub_category(&mut self, name: &str) -> Result<&SubCategory, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Please enter the subcategory name"));
        }
        if self.sub_category_by_name(name).is_some() {
            return Err(DomainError::DuplicateName(format!(
                "Subcategory '{}' already exists in category '{}'",
                name, self.name
            )));
        }

        self.sub_categories.push(SubCategory::new(name.to_string()));
        self.updated_at = Utc::now();

        let index = self.sub_categories.len() - 1;
        Ok(&self.sub_categories[index])
    }

    /// Remove a subcategory, keeping the order of the remaining entries.
    pub fn remove_sub_category(&mut self, id: Uuid) -> Option<SubCategory> {
        let index = self.sub_categories.iter().position(|sub| sub.id == id)?;
        self.updated_at = Utc::now();
        Some(self.sub_categories.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_name() {
        let category = Category::new("  News \n");
        assert_eq!(category.name, "News");
        assert!(category.sub_categories.is_empty());
    }

    #[test]
    fn test_add_sub_category_rejects_case_insensitive_duplicate() {
        let mut category = Category::new("Tech");
        category.add_sub_category("Rust").unwrap();

        let result = category.add_sub_category("rust");
        assert!(matches!(result, Err(DomainError::DuplicateName(_))));
        assert_eq!(category.sub_categories.len(), 1);
    }

    #[test]
    fn test_add_sub_category_rejects_blank_name() {
        let mut category = Category::new("Tech");
        assert!(matches!(
            category.add_sub_category("   "),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut category = Category::new("Tech");
        let a = category.add_sub_category("A").unwrap().id;
        let b = category.add_sub_category("B").unwrap().id;
        let c = category.add_sub_category("C").unwrap().id;

        let removed = category.remove_sub_category(b).unwrap();
        assert_eq!(removed.name, "B");

        let ids: Vec<Uuid> = category.sub_categories.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a, c]);
        assert!(category.remove_sub_category(b).is_none());
    }

    #[test]
    fn test_lookup_by_name_ignores_case() {
        let mut category = Category::new("Tech");
        let id = category.add_sub_category("Web Assembly").unwrap().id;

        assert_eq!(category.sub_category_by_name("web assembly").unwrap().id, id);
        assert!(category.sub_category_by_name("web").is_none());
    }

    #[test]
    fn test_serializes_sub_categories_under_public_name() {
        let mut category = Category::new("Tech");
        category.add_sub_category("Rust").unwrap();

        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["subCategory"][0]["name"], "Rust");
        assert!(json.get("createdAt").is_some());
    }
}
