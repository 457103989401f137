//! imagebin-core: shared types, IDs, errors, configuration, and the image store.
//!
//! This crate is the foundational dependency for the imagebin server,
//! providing the type-safe image identifier, a unified error type,
//! application configuration, the image data model, and the in-memory
//! store that is the single source of truth for uploaded images.

pub mod config;
pub mod error;
pub mod ids;
pub mod image;
pub mod store;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use ids::ImageId;
pub use image::{ImageMetadata, ImageMime, ImageRecord, MAX_IMAGE_BYTES};
pub use store::ImageStore;
