//! Directory scanning: photos on disk → layout items.
//!
//! A gallery is a flat directory of images. Order follows the `NNN-` filename
//! prefix, the same convention photographers already use to sequence a set:
//!
//! ```text
//! gallery/
//! ├── layout.toml         # optional, see config
//! ├── 001-dawn.jpg        # first
//! ├── 010-ridge.avif      # non-contiguous numbering is fine
//! ├── 020-lake.png
//! └── outtake.jpg         # unnumbered files go last, by name
//! ```
//!
//! Only headers are read. Dimensions are looked up in parallel with rayon;
//! results come back in gallery order regardless.

use crate::imaging::{BackendError, ImageBackend, supported_input_extensions};
use crate::types::Item;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read image size: {0}")]
    Imaging(#[from] BackendError),
    #[error("No images found in {0}")]
    NoImages(PathBuf),
}

/// One image found in the gallery directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannedImage {
    pub filename: String,
    pub width: u32,
    pub height: u32,
}

impl ScannedImage {
    /// A layout item carrying the filename as `src`.
    pub fn to_item(&self) -> Item {
        let mut extra = Map::new();
        extra.insert("src".to_string(), Value::String(self.filename.clone()));
        Item::from_dimensions(self.width, self.height, extra)
    }
}

/// Layout items for a scanned gallery, in gallery order.
pub fn to_items(images: &[ScannedImage]) -> Vec<Item> {
    images.iter().map(ScannedImage::to_item).collect()
}

/// Scan `dir` for images and read their dimensions.
pub fn scan(dir: &Path, backend: &impl ImageBackend) -> Result<Vec<ScannedImage>, ScanError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_image(p))
        .collect();
    if paths.is_empty() {
        return Err(ScanError::NoImages(dir.to_path_buf()));
    }
    paths.sort_by_key(|p| sort_key(p));
    log::debug!("found {} images in {}", paths.len(), dir.display());

    let images = paths
        .par_iter()
        .map(|path| {
            let dims = backend.identify(path)?;
            log::trace!("{}: {}x{}", path.display(), dims.width, dims.height);
            Ok(ScannedImage {
                filename: file_name(path),
                width: dims.width,
                height: dims.height,
            })
        })
        .collect::<Result<Vec<_>, BackendError>>()?;
    Ok(images)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn is_image(path: &Path) -> bool {
    if !path.is_file() || file_name(path).starts_with('.') {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    supported_input_extensions().contains(&ext.as_str())
}

/// Numbered files first, by number; then everything else, by name.
fn sort_key(path: &Path) -> (u32, String) {
    let name = file_name(path);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    (parse_number_prefix(&stem).unwrap_or(u32::MAX), name)
}

/// Leading number of an `NNN-name` (or bare `NNN`) stem.
fn parse_number_prefix(stem: &str) -> Option<u32> {
    let prefix = stem.split_once('-').map_or(stem, |(head, _)| head);
    prefix.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use tempfile::TempDir;

    /// A gallery directory with empty placeholder files; the mock supplies sizes.
    fn gallery(names: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for name in names {
            fs::write(tmp.path().join(name), b"").unwrap();
        }
        tmp
    }

    #[test]
    fn number_prefix_parsing() {
        assert_eq!(parse_number_prefix("001-dawn"), Some(1));
        assert_eq!(parse_number_prefix("020"), Some(20));
        assert_eq!(parse_number_prefix("wip-drafts"), None);
        assert_eq!(parse_number_prefix("dawn"), None);
    }

    #[test]
    fn images_sorted_by_number_then_name() {
        let tmp = gallery(&["outtake.jpg", "020-lake.png", "001-dawn.jpg", "010-ridge.webp"]);
        let backend = MockBackend::with_dimensions(&[
            ("outtake.jpg", 100, 100),
            ("020-lake.png", 300, 200),
            ("001-dawn.jpg", 400, 300),
            ("010-ridge.webp", 200, 300),
        ]);
        let images = scan(tmp.path(), &backend).unwrap();
        let names: Vec<&str> = images.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(
            names,
            vec!["001-dawn.jpg", "010-ridge.webp", "020-lake.png", "outtake.jpg"]
        );
        assert_eq!(images[0].width, 400);
        assert_eq!(images[1].height, 300);
    }

    #[test]
    fn non_images_and_hidden_files_skipped() {
        let tmp = gallery(&["001-a.jpg", "layout.toml", "notes.txt", ".hidden.jpg"]);
        fs::create_dir(tmp.path().join("sub.jpg")).unwrap();
        let backend = MockBackend::with_dimensions(&[("001-a.jpg", 10, 10)]);
        let images = scan(tmp.path(), &backend).unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(backend.identified(), vec!["001-a.jpg"]);
    }

    #[test]
    fn uppercase_extension_is_an_image() {
        let tmp = gallery(&["001-A.JPG"]);
        let backend = MockBackend::with_dimensions(&[("001-A.JPG", 10, 20)]);
        assert_eq!(scan(tmp.path(), &backend).unwrap().len(), 1);
    }

    #[test]
    fn empty_directory_is_error() {
        let tmp = gallery(&["readme.md"]);
        let result = scan(tmp.path(), &MockBackend::default());
        assert!(matches!(result, Err(ScanError::NoImages(_))));
    }

    #[test]
    fn backend_failure_propagates() {
        let tmp = gallery(&["001-a.jpg", "002-b.jpg"]);
        let backend = MockBackend::with_dimensions(&[("001-a.jpg", 10, 10)]);
        let result = scan(tmp.path(), &backend);
        assert!(matches!(result, Err(ScanError::Imaging(_))));
    }

    #[test]
    fn items_carry_filename_as_src() {
        let images = vec![ScannedImage {
            filename: "001-dawn.jpg".into(),
            width: 1600,
            height: 1200,
        }];
        let items = to_items(&images);
        assert!((items[0].aspect_ratio() - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(
            items[0].extra().unwrap().get("src"),
            Some(&Value::from("001-dawn.jpg"))
        );
    }
}
