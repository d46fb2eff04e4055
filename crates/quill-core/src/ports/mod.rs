//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod storage;

pub use auth::{ADMIN_ROLE, AuthError, TokenClaims, TokenService};
pub use repository::{BaseRepository, CategoryRepository, PostRepository, QueryableRepository};
pub use storage::{ImageStorage, ImageUpload, StorageError};
