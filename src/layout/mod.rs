//! Justified layout: rows of near-uniform height that exactly fill the width.
//!
//! | Piece | Role |
//! |---|---|
//! | [`row`] | One row: accepts items until its height is in tolerance, then fixes geometry |
//! | [`engine`] | Creates rows, retries rejected items, handles breakout rows, widows and row limits |
//! | `calculations` | Pure rounding and clamping helpers |
//!
//! ```
//! use justified_layout::config::LayoutConfig;
//! use justified_layout::layout::compute;
//! use justified_layout::types::Item;
//!
//! let items: Vec<Item> = vec![1.5.into(), 1.0.into(), 2.0.into()];
//! let layout = compute(&items, &LayoutConfig::default()).unwrap();
//! assert_eq!(layout.boxes.len(), 3);
//! ```

mod calculations;
pub mod engine;
pub mod row;

pub use engine::{LayoutEngine, LayoutError, compute};
pub use row::{CompletedRow, Row, RowItem, RowParams, RowState};
