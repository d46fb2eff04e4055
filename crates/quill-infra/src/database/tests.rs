use chrono::Utc;
use sea_orm::{DatabaseBackend, EntityTrait, MockDatabase, QueryFilter, QueryTrait};
use serde_json::json;
use uuid::Uuid;

use quill_core::domain::{Category, Post};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, CategoryRepository, QueryableRepository};
use quill_core::query::{Condition, DocumentQuery, FieldValue, Predicate, Window};

use crate::database::condition::post_condition;
use crate::database::entity::{category, post};
use crate::database::postgres_repo::{PostgresCategoryRepository, PostgresPostRepository};

fn post_model(title: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        meta_description: None,
        content: "Content".to_owned(),
        tags: json!(["rust", "web"]),
        thumbnail_url: Some("https://img.example/t.png".to_owned()),
        thumbnail_file_id: Some("file_1".to_owned()),
        author_id: Uuid::new_v4(),
        category_id: None,
        sub_category_id: None,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn sql_for(predicate: &Predicate) -> String {
    post::Entity::find()
        .filter(post_condition(predicate).unwrap())
        .build(DatabaseBackend::Postgres)
        .to_string()
}

#[tokio::test]
async fn test_find_post_by_id() {
    let model = post_model("Test Post");
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.tags, vec!["rust", "web"]);
    assert_eq!(post.thumbnail.unwrap().file_id, "file_1");
}

#[tokio::test]
async fn test_find_matching_returns_window() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model("First"), post_model("Second")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let query = DocumentQuery {
        predicate: Predicate::default(),
        window: Some(Window { skip: 0, limit: 2 }),
    };

    let posts = repo.find_matching(&query).await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "First");
}

#[tokio::test]
async fn test_category_sub_categories_are_decoded() {
    let now = Utc::now();
    let sub_id = Uuid::new_v4();
    let model = category::Model {
        id: Uuid::new_v4(),
        name: "News".to_owned(),
        sub_categories: json!([{ "id": sub_id, "name": "Local" }]),
        created_at: now.into(),
        updated_at: now.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);
    let category: Category = repo.find_by_name("News").await.unwrap().unwrap();

    assert_eq!(category.sub_categories.len(), 1);
    assert_eq!(category.sub_categories[0].id, sub_id);
    assert_eq!(category.sub_categories[0].name, "Local");
}

#[tokio::test]
async fn test_unreadable_sub_categories_are_an_error() {
    let now = Utc::now();
    let model = category::Model {
        id: Uuid::new_v4(),
        name: "News".to_owned(),
        sub_categories: json!({ "not": "a list" }),
        created_at: now.into(),
        updated_at: now.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model.clone()]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);
    let result: Result<Option<Category>, RepoError> = repo.find_by_id(model.id).await;
    assert!(matches!(result, Err(RepoError::Query(_))));
}

#[tokio::test]
async fn test_unreadable_tags_are_an_error() {
    let mut model = post_model("Broken");
    model.tags = json!("rust");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = repo.find_matching(&DocumentQuery::default()).await;
    assert!(matches!(result, Err(RepoError::Query(_))));
}

#[test]
fn test_keyword_search_is_case_insensitive_like() {
    let predicate = Predicate::all([Condition::Contains {
        field: "title".to_string(),
        needle: "Rust".to_string(),
    }]);

    let sql = sql_for(&predicate);
    assert!(sql.contains(r#"LOWER("title") LIKE '%rust%'"#), "{sql}");
}

#[test]
fn test_repeated_filter_becomes_in_list() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let predicate = Predicate::all([Condition::AnyOf {
        field: "author".to_string(),
        values: vec![FieldValue::Uuid(a), FieldValue::Uuid(b)],
    }]);

    let sql = sql_for(&predicate);
    assert!(sql.contains(r#""author_id" IN"#), "{sql}");
}

#[test]
fn test_tag_equality_uses_containment() {
    let predicate = Predicate::all([Condition::eq(
        "tags",
        FieldValue::Text("rust".to_string()),
    )]);

    let sql = sql_for(&predicate);
    assert!(sql.contains(r#""tags" @>"#), "{sql}");
}

#[test]
fn test_empty_predicate_has_no_where_clause() {
    let sql = sql_for(&Predicate::default());
    assert!(!sql.contains("WHERE"), "{sql}");
}
