//! Pure arithmetic used when a row settles on its height.
//!
//! All functions here are pure and testable without building rows.

/// Round half away from negative infinity (`floor(x + 0.5)`).
///
/// Unlike `f64::round`, `-0.5` goes to `0`, not `-1`.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Clamp a proposed row height into the edge-case bounds.
///
/// Returns `(height, clamped_to_native_ratio)`. The ratio rescales item widths
/// so they still add up to the native (unclamped) row width; it is `1.0` when
/// no clamping happened.
pub fn clamp_row_height(new_height: f64, min: f64, max: f64, row_width: f64) -> (f64, f64) {
    let clamped = new_height.min(max).max(min);
    if clamped == new_height {
        (new_height, 1.0)
    } else {
        (clamped, (row_width / clamped) / (row_width / new_height))
    }
}

/// Cumulative rounding corrections for justifying `count` items.
///
/// Entry `i` is how far the right edge of item `i` must move left so the
/// overshoot is spread across the row instead of landing on a single item.
pub fn cumulative_errors(error_per_item: f64, count: usize) -> Vec<f64> {
    (1..=count)
        .map(|i| round_half_up(i as f64 * error_per_item))
        .collect()
}
