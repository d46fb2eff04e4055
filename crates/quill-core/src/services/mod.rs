//! Services - use cases composed from domain rules and ports.

mod category;
mod post;

pub use category::CategoryService;
pub use post::{PostPage, PostService};
