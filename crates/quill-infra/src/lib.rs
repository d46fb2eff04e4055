//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the post and category stores, image storage and
//! token validation.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `postgres` - PostgreSQL stores via SeaORM
//! - `auth` - JWT token validation
//! - `imagekit` - ImageKit thumbnail storage

pub mod database;
pub mod storage;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::{InMemoryCategoryRepository, InMemoryPostRepository};
pub use storage::InMemoryImageStorage;

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConfig, DatabaseConnections, PostgresCategoryRepository, PostgresPostRepository,
};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};

#[cfg(feature = "imagekit")]
pub use storage::{ImageKitConfig, ImageKitStorage};
