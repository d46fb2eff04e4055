//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::JwtConfig;

#[cfg(feature = "postgres")]
use quill_infra::DatabaseConfig;

#[cfg(feature = "imagekit")]
use quill_infra::ImageKitConfig;

const DEFAULT_POSTS_PER_PAGE: u64 = 15;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Page size of the post listing.
    pub posts_per_page: u64,
    pub jwt: JwtConfig,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    #[cfg(feature = "imagekit")]
    pub imagekit: Option<ImageKitConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            posts_per_page: env::var("POSTS_PER_PAGE")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|&p: &u64| p > 0)
                .unwrap_or(DEFAULT_POSTS_PER_PAGE),
            jwt: JwtConfig::from_env(),
            #[cfg(feature = "postgres")]
            database: DatabaseConfig::from_env(),
            #[cfg(feature = "imagekit")]
            imagekit: ImageKitConfig::from_env(),
        }
    }
}
