//! Post and category stores.
//!
//! The in-memory stores are always available; the PostgreSQL stores are
//! compiled with the `postgres` feature.

mod memory;

#[cfg(feature = "postgres")]
mod condition;
#[cfg(feature = "postgres")]
mod connections;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use memory::{
    InMemoryCategoryRepository, InMemoryCollection, InMemoryPostRepository, StoredDocument,
};

#[cfg(feature = "postgres")]
pub use connections::{DatabaseConfig, DatabaseConnections};

#[cfg(feature = "postgres")]
pub use postgres_repo::{PostgresCategoryRepository, PostgresPostRepository};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
