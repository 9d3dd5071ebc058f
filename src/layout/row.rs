//! A single row of the justified layout.
//!
//! A [`Row`] accepts items one at a time until their summed aspect ratio puts
//! the row height inside the tolerance band around the target. Adding an item
//! consumes the row and returns a [`RowState`]: either the row is still
//! building, or it has become a [`CompletedRow`] with final geometry. A
//! completed row cannot take more items, which the types enforce.
//!
//! ## Choosing the height
//!
//! For a row of width `W`, spacing `s` and `n` items, the height at which the
//! items exactly fill the row is `(W - s·(n-1)) / Σ aspect_ratio`. The row
//! completes as soon as that height falls inside
//! `[target·(1-tol), target·(1+tol)]` (expressed as aspect-ratio bounds). When
//! one more item would overshoot the band, the row keeps whichever item set
//! has its aspect-ratio sum closer to the target aspect ratio.

use super::calculations::{clamp_row_height, cumulative_errors, round_half_up};
use crate::config::WidowLayoutStyle;
use crate::types::Rect;
use log::trace;

/// An item as the row sees it: its input position and effective aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowItem {
    pub index: usize,
    pub aspect_ratio: f64,
}

/// Geometry and sizing limits a row is created with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowParams {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub spacing: f64,
    pub target_row_height: f64,
    pub target_row_height_tolerance: f64,
    pub is_breakout: bool,
    pub widow_layout_style: WidowLayoutStyle,
}

/// A row that is still accepting items.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    params: RowParams,
    min_aspect_ratio: f64,
    max_aspect_ratio: f64,
    edge_case_min_row_height: f64,
    edge_case_max_row_height: f64,
    items: Vec<RowItem>,
}

/// A row whose height is fixed, with one rect per item in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedRow {
    pub top: f64,
    pub height: f64,
    pub target_row_height: f64,
    pub is_breakout: bool,
    pub items: Vec<RowItem>,
    pub rects: Vec<Rect>,
}

/// Outcome of [`Row::add_item`].
#[derive(Debug, Clone, PartialEq)]
pub enum RowState {
    Building(Row),
    /// The row is done. `rejected` holds the item that did not make it in;
    /// the caller must place it on the next row.
    Complete {
        row: CompletedRow,
        rejected: Option<RowItem>,
    },
}

impl RowState {
    pub fn is_complete(&self) -> bool {
        matches!(self, RowState::Complete { .. })
    }
}

impl Row {
    pub fn new(params: RowParams) -> Self {
        let base_aspect_ratio = params.width / params.target_row_height;
        Self {
            min_aspect_ratio: base_aspect_ratio * (1.0 - params.target_row_height_tolerance),
            max_aspect_ratio: base_aspect_ratio * (1.0 + params.target_row_height_tolerance),
            edge_case_min_row_height: 0.5 * params.target_row_height,
            edge_case_max_row_height: 2.0 * params.target_row_height,
            params,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[RowItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_breakout(&self) -> bool {
        self.params.is_breakout
    }

    /// Row width left for items once `count` items' gaps are taken out.
    fn width_without_spacing(&self, count: usize) -> f64 {
        self.params.width - count.saturating_sub(1) as f64 * self.params.spacing
    }

    fn aspect_ratio_sum(&self) -> f64 {
        self.items.iter().map(|item| item.aspect_ratio).sum()
    }

    /// Offer an item to the row.
    pub fn add_item(mut self, item: RowItem) -> RowState {
        let row_width_without_spacing = self.width_without_spacing(self.items.len() + 1);
        let new_aspect_ratio = self.aspect_ratio_sum() + item.aspect_ratio;
        let target_aspect_ratio = row_width_without_spacing / self.params.target_row_height;

        // A breakout row shows one landscape item across the whole width.
        if self.params.is_breakout && self.items.is_empty() && item.aspect_ratio >= 1.0 {
            self.items.push(item);
            let height = row_width_without_spacing / item.aspect_ratio;
            trace!("breakout row at item {} (height {height})", item.index);
            return self.accepted(height);
        }

        if new_aspect_ratio < self.min_aspect_ratio {
            self.items.push(item);
            return RowState::Building(self);
        }

        if new_aspect_ratio > self.max_aspect_ratio && !self.items.is_empty() {
            let previous_width = self.width_without_spacing(self.items.len());
            let previous_aspect_ratio = self.aspect_ratio_sum();
            let previous_target_aspect_ratio = previous_width / self.params.target_row_height;

            // Compared on aspect-ratio deltas, not heights.
            if (new_aspect_ratio - target_aspect_ratio).abs()
                > (previous_aspect_ratio - previous_target_aspect_ratio).abs()
            {
                trace!(
                    "item {} rejected: {new_aspect_ratio} is further from {target_aspect_ratio}",
                    item.index
                );
                let row = self.complete_layout(
                    previous_width / previous_aspect_ratio,
                    WidowLayoutStyle::Justify,
                );
                return RowState::Complete {
                    row,
                    rejected: Some(item),
                };
            }
        }

        // Inside the band, closer with the item than without it, or a lone
        // item too wide for any row.
        self.items.push(item);
        self.accepted(row_width_without_spacing / new_aspect_ratio)
    }

    fn accepted(self, height: f64) -> RowState {
        RowState::Complete {
            row: self.complete_layout(height, WidowLayoutStyle::Justify),
            rejected: None,
        }
    }

    /// Finish a row that never reached the tolerance band.
    ///
    /// Uses `row_height` when given (normally the previous row's), otherwise
    /// the target height, and the configured widow layout style.
    pub fn force_complete(self, row_height: Option<f64>) -> CompletedRow {
        let height = row_height.unwrap_or(self.params.target_row_height);
        let style = self.params.widow_layout_style;
        self.complete_layout(height, style)
    }

    /// Fix the row height and compute every item's rect.
    fn complete_layout(self, new_height: f64, style: WidowLayoutStyle) -> CompletedRow {
        let params = self.params;
        let count = self.items.len();
        let row_width_without_spacing = self.width_without_spacing(count);
        let (height, clamped_to_native_ratio) = clamp_row_height(
            new_height,
            self.edge_case_min_row_height,
            self.edge_case_max_row_height,
            row_width_without_spacing,
        );
        if clamped_to_native_ratio != 1.0 {
            trace!("row at {} clamped from {new_height} to {height}", params.top);
        }

        let mut cursor = params.left;
        let mut rects: Vec<Rect> = self
            .items
            .iter()
            .map(|item| {
                let width = item.aspect_ratio * height * clamped_to_native_ratio;
                let rect = Rect {
                    top: params.top,
                    left: cursor,
                    width,
                    height,
                };
                cursor += width + params.spacing;
                rect
            })
            .collect();

        match style {
            WidowLayoutStyle::Justify => {
                let items_width = cursor - (params.spacing + params.left);
                let error_per_item = (items_width - params.width) / count as f64;
                if count == 1 {
                    rects[0].width -= round_half_up(error_per_item);
                } else {
                    let errors = cumulative_errors(error_per_item, count);
                    let mut previous = 0.0;
                    for (rect, &error) in rects.iter_mut().zip(&errors) {
                        rect.left -= previous;
                        rect.width -= error - previous;
                        previous = error;
                    }
                }
            }
            WidowLayoutStyle::Center => {
                let offset = (params.width - cursor) / 2.0 + params.spacing;
                for rect in &mut rects {
                    rect.left += offset;
                }
            }
            WidowLayoutStyle::Left => {}
        }

        CompletedRow {
            top: params.top,
            height,
            target_row_height: params.target_row_height,
            is_breakout: params.is_breakout,
            items: self.items,
            rects,
        }
    }
}

impl CompletedRow {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
