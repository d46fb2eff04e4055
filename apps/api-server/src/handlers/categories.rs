//! Category and subcategory handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_shared::ApiResponse;
use quill_shared::dto::{AddSubCategoryRequest, CreateCategoryRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list_categories().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(categories)))
}

/// POST /api/categories
pub async fn create_category(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;

    let category = state.categories.create_category(&body.name).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        category,
        "Category created successfully",
    )))
}

/// GET /api/categories/{id}
pub async fn get_category(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let category = state.categories.get_category(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(category)))
}

/// GET /api/categories/by-name/{name}
pub async fn get_category_by_name(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let category = state.categories.get_category_by_name(&path).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(category)))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;

    state.categories.delete_category(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Category deleted successfully")))
}

/// POST /api/categories/{id}/subcategories
pub async fn add_sub_category(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<AddSubCategoryRequest>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;

    let category = state
        .categories
        .add_sub_category(path.into_inner(), &body.name)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        category,
        "Subcategory added successfully",
    )))
}

/// DELETE /api/categories/{id}/subcategories/{sub_id}
pub async fn delete_sub_category(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;
    let (category_id, sub_category_id) = path.into_inner();

    let category = state
        .categories
        .delete_sub_category(category_id, sub_category_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        category,
        "Subcategory deleted successfully",
    )))
}

/// GET /api/categories/{category}/{sub_category}/posts
pub async fn posts_by_sub_category(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (category, sub_category) = path.into_inner();

    let posts = state
        .categories
        .posts_by_sub_category_name(&category, &sub_category)
        .await?;
    if posts.is_empty() {
        return Err(AppError::NotFound(
            "No posts found for this subcategory".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}
