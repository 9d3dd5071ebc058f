//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stderr, keeping stdout
//! free for JSON. Format functions are pure: no I/O, no side effects.
//!
//! ## Scan
//!
//! ```text
//! Images
//! 001 001-dawn.jpg 1600x1200 (1.33)
//! 002 010-ridge.avif 800x1200 (0.67)
//! ```
//!
//! ## Layout
//!
//! ```text
//! Rows
//! 001 top 10 height 343.3 (3 items)
//! 002 top 363.3 height 520 (1 item, breakout)
//! 003 top 893.3 height 520 (2 items, widow)
//!
//! 6 boxes, container height 1423.3
//! ```

use crate::scan::ScannedImage;
use crate::types::Layout;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// One decimal at most; whole numbers print bare.
fn format_length(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    format!("{rounded}")
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

/// Format scan output: one line per image in gallery order.
pub fn format_scan_output(images: &[ScannedImage]) -> Vec<String> {
    let mut lines = vec!["Images".to_string()];
    for (i, image) in images.iter().enumerate() {
        let ratio = f64::from(image.width) / f64::from(image.height);
        lines.push(format!(
            "{} {} {}x{} ({ratio:.2})",
            format_index(i + 1),
            image.filename,
            image.width,
            image.height
        ));
    }
    lines
}

/// Format layout output: one line per row, then totals.
pub fn format_layout_output(layout: &Layout) -> Vec<String> {
    let mut lines = vec!["Rows".to_string()];
    for (i, row) in layout.rows.iter().enumerate() {
        let mut detail = plural(row.item_count, "item", "items");
        if row.is_breakout {
            detail.push_str(", breakout");
        }
        if row.is_widow {
            detail.push_str(", widow");
        }
        lines.push(format!(
            "{} top {} height {} ({detail})",
            format_index(i + 1),
            format_length(row.top),
            format_length(row.height)
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "{}, container height {}",
        plural(layout.boxes.len(), "box", "boxes"),
        format_length(layout.container_height)
    ));
    lines
}

pub fn print_scan_output(images: &[ScannedImage]) {
    for line in format_scan_output(images) {
        eprintln!("{line}");
    }
}

pub fn print_layout_output(layout: &Layout) {
    for line in format_layout_output(layout) {
        eprintln!("{line}");
    }
}
