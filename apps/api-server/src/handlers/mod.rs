//! HTTP handlers and route configuration.

mod categories;
mod health;
mod posts;
mod thumbnail;


use actix_web::{HttpRequest, error::JsonPayloadError, web};

use crate::middleware::error::AppError;

/// Request bodies carry base64 thumbnails.
const JSON_LIMIT: usize = 10 * 1024 * 1024;

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            AppError::BadRequest(err.to_string()).into()
        })
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::patch().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post)),
            )
            .service(
                web::scope("/categories")
                    .route("", web::get().to(categories::list_categories))
                    .route("", web::post().to(categories::create_category))
                    .route(
                        "/by-name/{name}",
                        web::get().to(categories::get_category_by_name),
                    )
                    .route("/{id}", web::get().to(categories::get_category))
                    .route("/{id}", web::delete().to(categories::delete_category))
                    .route(
                        "/{id}/subcategories",
                        web::post().to(categories::add_sub_category),
                    )
                    .route(
                        "/{id}/subcategories/{sub_id}",
                        web::delete().to(categories::delete_sub_category),
                    )
                    .route(
                        "/{category}/{sub_category}/posts",
                        web::get().to(categories::posts_by_sub_category),
                    ),
            ),
    );
}
