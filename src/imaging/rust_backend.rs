//! Pure Rust dimension reader.
//!
//! Only headers are read: `image::image_dimensions` stops after the header for
//! the raster formats, and AVIF sizes come from the container's `ispe`
//! property via `avif-parse`, so no pixel data is ever decoded.

use super::backend::{BackendError, Dimensions, ImageBackend};
use image::ImageFormat;
use std::path::Path;
use std::sync::LazyLock;

/// Extensions the `image` crate can size, paired with their format.
const HEADER_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut exts: Vec<&'static str> = HEADER_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect();
    exts.push("avif");
    exts
});

/// Lower-case extensions [`RustBackend`] can identify.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Dimension reader backed by the `image` crate and `avif-parse`.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn is_avif(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("avif"))
}

/// Extract dimensions from an AVIF file's container metadata.
fn identify_avif(path: &Path) -> Result<Dimensions, BackendError> {
    let file_data = std::fs::read(path)?;
    let avif = avif_parse::read_avif(&mut std::io::Cursor::new(&file_data)).map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to parse AVIF {}: {e:?}", path.display()))
    })?;
    let meta = avif.primary_item_metadata().map_err(|e| {
        BackendError::ProcessingFailed(format!(
            "Failed to read AVIF metadata {}: {e:?}",
            path.display()
        ))
    })?;
    Ok(Dimensions {
        width: meta.max_frame_width.get(),
        height: meta.max_frame_height.get(),
    })
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let dims = if is_avif(path) {
            identify_avif(path)?
        } else {
            let (width, height) = image::image_dimensions(path).map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "Failed to read dimensions of {}: {e}",
                    path.display()
                ))
            })?;
            Dimensions { width, height }
        };
        if dims.width == 0 || dims.height == 0 {
            return Err(BackendError::ProcessingFailed(format!(
                "{} reports zero size ({}x{})",
                path.display(),
                dims.width,
                dims.height
            )));
        }
        Ok(dims)
    }
}
