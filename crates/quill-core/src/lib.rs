//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! Posts, the category hierarchy and the listing query pipeline live here,
//! with storage and transport left to the ports.

pub mod domain;
pub mod error;
pub mod ports;
pub mod projection;
pub mod query;
pub mod services;

pub use error::DomainError;
