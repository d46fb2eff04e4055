//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{NewPost, PostUpdate};
use quill_core::query::QueryParams;
use quill_shared::ApiResponse;
use quill_shared::dto::{CreatePostRequest, UpdatePostRequest};

use super::thumbnail;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts?keyword=&page=&<field>[op]=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<Vec<(String, String)>>,
) -> AppResult<HttpResponse> {
    let params: QueryParams = query.into_inner().into_iter().collect();
    let page = state.posts.list_posts(params, state.posts_per_page).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// POST /api/posts
pub async fn create_post(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let author = identity.require_admin()?;
    let req = body.into_inner();

    let data_uri = req
        .thumbnail
        .ok_or_else(|| AppError::BadRequest("Please upload a thumbnail".to_string()))?;
    let image = thumbnail::decode(&data_uri, req.thumbnail_name)?;

    let input = NewPost {
        title: req.title,
        meta_description: req.meta_description,
        content: req.content,
        tags: req.tags.map(|t| t.into_tags()).transpose()?.unwrap_or_default(),
        category: req.category,
        sub_category: req.sub_category,
    };

    let post = state.posts.create_post(author, input, image).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        post,
        "Post created successfully",
    )))
}

/// PATCH /api/posts/{id}
pub async fn update_post(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let actor = identity.require_admin()?;
    let req = body.into_inner();

    let image = req
        .thumbnail
        .map(|uri| thumbnail::decode(&uri, req.thumbnail_name))
        .transpose()?;

    let update = PostUpdate {
        title: req.title,
        meta_description: req.meta_description,
        content: req.content,
        tags: req.tags.map(|t| t.into_tags()).transpose()?,
    };

    let post = state
        .posts
        .update_post(actor, path.into_inner(), update, image)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        post,
        "Post updated successfully",
    )))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let actor = identity.require_admin()?;
    state.posts.delete_post(actor, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Post deleted successfully")))
}
