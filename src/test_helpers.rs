//! Shared test utilities for layout assertions.
//!
//! Boxes come out as a flat list; most assertions want them grouped by row,
//! which these helpers do by consecutive equal `top`.

use crate::types::{Item, Layout, LayoutBox};

/// Bare aspect-ratio items.
pub fn items_from_ratios(ratios: &[f64]) -> Vec<Item> {
    ratios.iter().copied().map(Item::AspectRatio).collect()
}

/// Boxes grouped into rows, in output order.
pub fn rows_of(layout: &Layout) -> Vec<Vec<&LayoutBox>> {
    let mut rows: Vec<Vec<&LayoutBox>> = Vec::new();
    for b in &layout.boxes {
        match rows.last_mut() {
            Some(row) if row[0].top == b.top => row.push(b),
            _ => rows.push(vec![b]),
        }
    }
    rows
}

/// Assert no two boxes in a row overlap horizontally.
pub fn assert_no_overlap(layout: &Layout) {
    for (r, row) in rows_of(layout).iter().enumerate() {
        for pair in row.windows(2) {
            assert!(
                pair[0].left + pair[0].width <= pair[1].left + 1e-6,
                "row {r}: box {} (right {}) overlaps box {} (left {})",
                pair[0].index,
                pair[0].left + pair[0].width,
                pair[1].index,
                pair[1].left
            );
        }
    }
}

/// Assert rows start at `padding_top` and each sits `vertical` below the last.
pub fn assert_rows_stacked(layout: &Layout, padding_top: f64, vertical: f64) {
    let mut expected_top = padding_top;
    for summary in &layout.rows {
        assert!(
            (summary.top - expected_top).abs() < 1e-6,
            "row top {} != expected {expected_top}",
            summary.top
        );
        expected_top = summary.top + summary.height + vertical;
    }
}
