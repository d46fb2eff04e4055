//! Thumbnail storage backends.

mod memory;

#[cfg(feature = "imagekit")]
mod imagekit;

pub use memory::InMemoryImageStorage;

#[cfg(feature = "imagekit")]
pub use imagekit::{ImageKitConfig, ImageKitStorage};
