//! Image dimensions, the only thing the layout needs from a photo.
//!
//! | Format | Crate / function |
//! |---|---|
//! | JPEG, PNG, TIFF, WebP | `image::image_dimensions` (header only) |
//! | AVIF | `avif-parse` container metadata |
//!
//! The module is split into:
//! - **Backend**: [`ImageBackend`] trait, so scanning can run against a mock
//! - **RustBackend**: the production implementation

pub mod backend;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use rust_backend::{RustBackend, supported_input_extensions};
