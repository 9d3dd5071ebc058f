//! # Justified Layout
//!
//! Packs a sequence of images into rows of near-uniform height that exactly
//! fill a container's width, the way photo galleries lay out mixed portrait
//! and landscape shots without cropping.
//!
//! The engine only sees aspect ratios. It never decodes images or touches
//! the DOM: callers hand it an ordered list of items and a configuration and
//! get back one box per placed item plus the total container height.
//!
//! ```text
//! items (aspect ratios)  ──┐
//!                          ├──▶  LayoutEngine::compute  ──▶  boxes + container height
//! LayoutConfig  ───────────┘
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`layout`] | The engine: row accumulation, completion, breakout rows, widows |
//! | [`types`] | Input [`Item`](types::Item) and output [`Layout`](types::Layout) / [`LayoutBox`](types::LayoutBox) |
//! | [`config`] | `layout.toml` loading, merging, validation and normalization |
//! | [`imaging`] | Reads image dimensions from headers (pure Rust, no pixel decoding) |
//! | [`scan`] | Directory of photos → ordered layout items |
//! | [`preview`] | Renders a computed layout as a static HTML page using Maud |
//! | [`output`] | CLI output formatting for scan and layout results |
//!
//! # Design Decisions
//!
//! ## Rows Are Values
//!
//! A [`Row`](layout::Row) is consumed by `add_item` and comes back either
//! still building or complete. There is no "height is zero means unfinished"
//! sentinel; the type says which state a row is in.
//!
//! ## Pixel-Exact Justification
//!
//! Widths are rounded to whole units and the rounding error is spread across
//! the row so its right edge lands exactly on the container's inner edge.
//!
//! ## Direction Lives in the Renderer
//!
//! Boxes are always measured from the left. Right-to-left galleries are
//! mirrored by [`preview`], never by the engine.

pub mod config;
pub mod imaging;
pub mod layout;
pub mod output;
pub mod preview;
pub mod scan;
pub mod types;

pub use config::LayoutConfig;
pub use layout::{LayoutEngine, LayoutError, compute};
pub use types::{Item, Layout, LayoutBox};

#[cfg(test)]
pub(crate) mod test_helpers;
