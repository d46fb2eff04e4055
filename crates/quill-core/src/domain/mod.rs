//! Domain entities - the core business objects.

mod category;
mod post;

pub use category::{Category, SubCategory};
pub use post::{NewPost, PopulatedPost, Post, PostUpdate, THUMBNAIL_FOLDER, Thumbnail};
