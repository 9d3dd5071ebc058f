//! Layout configuration.
//!
//! Handles loading, validating, merging and normalizing `layout.toml`. Stock
//! defaults are the base layer; a user file and then command-line overrides are
//! merged on top of them before the result is deserialized and validated.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! container_width = 1060
//! container_padding = 10          # or { top = 10, right = 10, bottom = 10, left = 10 }
//! box_spacing = 10                # or { horizontal = 10, vertical = 10 }
//! target_row_height = 320
//! target_row_height_tolerance = 0.25
//! # max_num_rows = 5
//! # force_aspect_ratio = 1.5
//! show_widows = true
//! # full_width_breakout_row_cadence = 3
//! widow_layout_style = "left"     # "left", "justify" or "center"
//! ```
//!
//! ## Padding and Spacing
//!
//! A bare number applies to every side (or axis). A table may name any subset
//! of sides; the unnamed ones are `0`, not the stock `10`:
//!
//! ```toml
//! container_padding = { top = 20 }   # right, bottom, left are 0
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the config directory.
pub const CONFIG_FILE_NAME: &str = "layout.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// How a forced-complete (widow) row spends the width it does not fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidowLayoutStyle {
    /// Items keep their natural widths; leftover space trails on the right.
    #[default]
    Left,
    /// Rounding error is spread across the items so the row spans the width.
    Justify,
    /// Items keep their natural widths and are shifted to the middle.
    Center,
}

/// Outer padding: one number for every side, or a partial table of sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContainerPadding {
    Uniform(f64),
    PerSide(PaddingSides),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaddingSides {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

/// Gap between boxes: one number for both axes, or a partial table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoxSpacing {
    Uniform(f64),
    PerAxis(SpacingAxes),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpacingAxes {
    pub horizontal: Option<f64>,
    pub vertical: Option<f64>,
}

/// Padding with every side spelled out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sides {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Spacing with both axes spelled out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaps {
    pub horizontal: f64,
    pub vertical: f64,
}

impl ContainerPadding {
    pub fn sides(&self) -> Sides {
        match *self {
            ContainerPadding::Uniform(n) => Sides {
                top: n,
                right: n,
                bottom: n,
                left: n,
            },
            ContainerPadding::PerSide(p) => Sides {
                top: p.top.unwrap_or(0.0),
                right: p.right.unwrap_or(0.0),
                bottom: p.bottom.unwrap_or(0.0),
                left: p.left.unwrap_or(0.0),
            },
        }
    }
}

impl BoxSpacing {
    pub fn gaps(&self) -> Gaps {
        match *self {
            BoxSpacing::Uniform(n) => Gaps {
                horizontal: n,
                vertical: n,
            },
            BoxSpacing::PerAxis(a) => Gaps {
                horizontal: a.horizontal.unwrap_or(0.0),
                vertical: a.vertical.unwrap_or(0.0),
            },
        }
    }
}

/// Layout configuration loaded from `layout.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Available width in layout units.
    pub container_width: f64,
    pub container_padding: ContainerPadding,
    pub box_spacing: BoxSpacing,
    /// Ideal row height before justification.
    pub target_row_height: f64,
    /// Fractional deviation from the target a row may settle at.
    pub target_row_height_tolerance: f64,
    /// Stop after this many rows; remaining items are dropped.
    pub max_num_rows: Option<usize>,
    /// Lay every item out as if it had this aspect ratio.
    pub force_aspect_ratio: Option<f64>,
    /// Force-complete a trailing row that never filled up.
    pub show_widows: bool,
    /// Every Nth row holds a single full-width landscape item. `0` disables.
    pub full_width_breakout_row_cadence: Option<usize>,
    pub widow_layout_style: WidowLayoutStyle,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            container_width: 1060.0,
            container_padding: ContainerPadding::Uniform(10.0),
            box_spacing: BoxSpacing::Uniform(10.0),
            target_row_height: 320.0,
            target_row_height_tolerance: 0.25,
            max_num_rows: None,
            force_aspect_ratio: None,
            show_widows: true,
            full_width_breakout_row_cadence: None,
            widow_layout_style: WidowLayoutStyle::Left,
        }
    }
}

/// A validated config with padding and spacing normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub container_width: f64,
    pub padding: Sides,
    pub spacing: Gaps,
    pub target_row_height: f64,
    pub target_row_height_tolerance: f64,
    pub max_num_rows: Option<usize>,
    pub force_aspect_ratio: Option<f64>,
    pub show_widows: bool,
    /// `None` when breakout rows are off (unset or zero cadence).
    pub breakout_cadence: Option<usize>,
    pub widow_layout_style: WidowLayoutStyle,
}

impl ResolvedConfig {
    /// Width rows are laid out in, between the left and right padding.
    pub fn row_width(&self) -> f64 {
        self.container_width - self.padding.left - self.padding.right
    }
}

fn ensure_non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Validation(format!(
            "{name} must be a finite, non-negative number (got {value})"
        )));
    }
    Ok(())
}

fn ensure_positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "{name} must be a finite, positive number (got {value})"
        )));
    }
    Ok(())
}

impl LayoutConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("container_width", self.container_width)?;
        ensure_positive("target_row_height", self.target_row_height)?;
        ensure_non_negative(
            "target_row_height_tolerance",
            self.target_row_height_tolerance,
        )?;

        let padding = self.container_padding.sides();
        ensure_non_negative("container_padding.top", padding.top)?;
        ensure_non_negative("container_padding.right", padding.right)?;
        ensure_non_negative("container_padding.bottom", padding.bottom)?;
        ensure_non_negative("container_padding.left", padding.left)?;

        let spacing = self.box_spacing.gaps();
        ensure_non_negative("box_spacing.horizontal", spacing.horizontal)?;
        ensure_non_negative("box_spacing.vertical", spacing.vertical)?;

        if self.container_width - padding.left - padding.right <= 0.0 {
            return Err(ConfigError::Validation(
                "container_padding leaves no room for rows inside container_width".into(),
            ));
        }
        if let Some(ratio) = self.force_aspect_ratio {
            ensure_positive("force_aspect_ratio", ratio)?;
        }
        Ok(())
    }

    /// Validate and normalize into the form the engine works with.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        self.validate()?;
        Ok(ResolvedConfig {
            container_width: self.container_width,
            padding: self.container_padding.sides(),
            spacing: self.box_spacing.gaps(),
            target_row_height: self.target_row_height,
            target_row_height_tolerance: self.target_row_height_tolerance,
            max_num_rows: self.max_num_rows,
            force_aspect_ratio: self.force_aspect_ratio,
            show_widows: self.show_widows,
            breakout_cadence: self.full_width_breakout_row_cadence.filter(|&n| n > 0),
            widow_layout_style: self.widow_layout_style,
        })
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(LayoutConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
///
/// A table overlay on a scalar base replaces it, so `container_padding =
/// { top = 5 }` over the stock `10` yields a per-side table, not a mix.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `layout.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `layout.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    log::debug!("loaded {}", config_path.display());
    Ok(Some(value))
}

/// Merge the overlays onto a base value in order, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<LayoutConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: LayoutConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `layout.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<LayoutConfig, ConfigError> {
    let overlay = load_raw_config(dir)?;
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `layout.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Justified Layout Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Available width, in the same units the boxes come out in (usually px).
container_width = 1060

# Padding around the whole gallery. Either one number for every side, or a
# table naming some sides; unnamed sides are 0:
#   container_padding = { top = 20, bottom = 20 }
container_padding = 10

# Gap between boxes in a row (horizontal) and between rows (vertical).
# Either one number or a table:
#   box_spacing = { horizontal = 4, vertical = 12 }
box_spacing = 10

# ---------------------------------------------------------------------------
# Row sizing
# ---------------------------------------------------------------------------
# Ideal row height before the row is stretched to fill the width.
target_row_height = 320

# How far a row may deviate from the target (0.25 = +/-25%).
target_row_height_tolerance = 0.25

# Stop after this many rows; items that don't fit are left out.
# max_num_rows = 5

# Lay every item out with the same aspect ratio (e.g. uniform thumbnails).
# force_aspect_ratio = 1.5

# ---------------------------------------------------------------------------
# Special rows
# ---------------------------------------------------------------------------
# Every Nth row shows a single landscape item across the full width.
# full_width_breakout_row_cadence = 3

# Lay out a last row that never filled up ("widows").
show_widows = true

# How widows use the leftover width: "left", "justify" or "center".
widow_layout_style = "left"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = LayoutConfig::default();
        assert_eq!(config.container_width, 1060.0);
        assert_eq!(config.container_padding, ContainerPadding::Uniform(10.0));
        assert_eq!(config.box_spacing, BoxSpacing::Uniform(10.0));
        assert_eq!(config.target_row_height, 320.0);
        assert_eq!(config.target_row_height_tolerance, 0.25);
        assert_eq!(config.max_num_rows, None);
        assert_eq!(config.force_aspect_ratio, None);
        assert!(config.show_widows);
        assert_eq!(config.full_width_breakout_row_cadence, None);
        assert_eq!(config.widow_layout_style, WidowLayoutStyle::Left);
    }

    #[test]
    fn parse_partial_config() {
        let config: LayoutConfig = toml::from_str("target_row_height = 200").unwrap();
        assert_eq!(config.target_row_height, 200.0);
        assert_eq!(config.container_width, 1060.0);
    }

    #[test]
    fn parse_integer_into_float_fields() {
        let config: LayoutConfig =
            toml::from_str("container_width = 900\ncontainer_padding = 0").unwrap();
        assert_eq!(config.container_width, 900.0);
        assert_eq!(config.container_padding.sides().left, 0.0);
    }

    #[test]
    fn parse_widow_layout_style() {
        let config: LayoutConfig = toml::from_str(r#"widow_layout_style = "center""#).unwrap();
        assert_eq!(config.widow_layout_style, WidowLayoutStyle::Center);

        let result: Result<LayoutConfig, _> = toml::from_str(r#"widow_layout_style = "right""#);
        assert!(result.is_err());
    }

    // =========================================================================
    // Padding / spacing normalization
    // =========================================================================

    #[test]
    fn uniform_padding_applies_to_every_side() {
        let sides = ContainerPadding::Uniform(7.0).sides();
        assert_eq!(
            sides,
            Sides {
                top: 7.0,
                right: 7.0,
                bottom: 7.0,
                left: 7.0
            }
        );
    }

    #[test]
    fn partial_padding_defaults_missing_sides_to_zero() {
        let config: LayoutConfig = toml::from_str("container_padding = { top = 20 }").unwrap();
        let sides = config.container_padding.sides();
        assert_eq!(sides.top, 20.0);
        assert_eq!(sides.right, 0.0);
        assert_eq!(sides.bottom, 0.0);
        assert_eq!(sides.left, 0.0);
    }

    #[test]
    fn partial_spacing_defaults_missing_axis_to_zero() {
        let config: LayoutConfig = toml::from_str("box_spacing = { vertical = 12 }").unwrap();
        let gaps = config.box_spacing.gaps();
        assert_eq!(gaps.horizontal, 0.0);
        assert_eq!(gaps.vertical, 12.0);
    }

    #[test]
    fn unknown_padding_side_rejected() {
        let result: Result<LayoutConfig, _> = toml::from_str("container_padding = { middle = 1 }");
        assert!(result.is_err());
    }

    #[test]
    fn resolve_normalizes_and_disables_zero_cadence() {
        let config = LayoutConfig {
            full_width_breakout_row_cadence: Some(0),
            ..LayoutConfig::default()
        };
        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.breakout_cadence, None);
        assert_eq!(resolved.row_width(), 1040.0);
        assert_eq!(resolved.spacing.vertical, 10.0);
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_row_height() {
        let config = LayoutConfig {
            target_row_height: 0.0,
            ..LayoutConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("target_row_height"));
    }

    #[test]
    fn validate_rejects_nan_width() {
        let config = LayoutConfig {
            container_width: f64::NAN,
            ..LayoutConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_negative_spacing() {
        let config = LayoutConfig {
            box_spacing: BoxSpacing::PerAxis(SpacingAxes {
                horizontal: Some(-1.0),
                vertical: None,
            }),
            ..LayoutConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("box_spacing.horizontal"));
    }

    #[test]
    fn validate_rejects_padding_wider_than_container() {
        let config = LayoutConfig {
            container_width: 100.0,
            container_padding: ContainerPadding::Uniform(50.0),
            ..LayoutConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_forced_ratio() {
        let config = LayoutConfig {
            force_aspect_ratio: Some(0.0),
            ..LayoutConfig::default()
        };
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // merge_toml / resolve_config
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("target_row_height = 320").unwrap();
        let overlay: toml::Value = toml::from_str("target_row_height = 250").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(
            merged.get("target_row_height").unwrap().as_integer(),
            Some(250)
        );
    }

    #[test]
    fn merge_toml_table_over_scalar_replaces() {
        let base: toml::Value = toml::from_str("container_padding = 10").unwrap();
        let overlay: toml::Value = toml::from_str("container_padding = { top = 5 }").unwrap();
        let merged = merge_toml(base, overlay);
        let padding = merged.get("container_padding").unwrap();
        assert!(padding.is_table());
        assert!(padding.get("left").is_none());
    }

    #[test]
    fn merge_toml_table_merges_sides() {
        let base: toml::Value = toml::from_str("container_padding = { top = 5 }").unwrap();
        let overlay: toml::Value = toml::from_str("container_padding = { left = 3 }").unwrap();
        let merged = merge_toml(base, overlay);
        let padding = merged.get("container_padding").unwrap();
        assert_eq!(padding.get("top").unwrap().as_integer(), Some(5));
        assert_eq!(padding.get("left").unwrap().as_integer(), Some(3));
    }

    #[test]
    fn resolve_config_applies_overlays_in_order() {
        let file: toml::Value = toml::from_str("target_row_height = 200").unwrap();
        let cli: toml::Value = toml::from_str("target_row_height = 180").unwrap();
        let config = resolve_config(stock_defaults_value(), [file, cli]).unwrap();
        assert_eq!(config.target_row_height, 180.0);
        assert_eq!(config.container_width, 1060.0);
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let overlay: toml::Value = toml::from_str("container_width = -5").unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<LayoutConfig, _> = toml::from_str("target_row_hieght = 300");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    // =========================================================================
    // load_config
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, LayoutConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "container_width = 800\nbox_spacing = { horizontal = 4, vertical = 8 }\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.container_width, 800.0);
        assert_eq!(
            config.box_spacing.gaps(),
            Gaps {
                horizontal: 4.0,
                vertical: 8.0
            }
        );
        assert_eq!(config.target_row_height, 320.0);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "target_row_height = 0").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert!(load_raw_config(tmp.path()).unwrap().is_none());
    }

    // =========================================================================
    // stock config
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: LayoutConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, LayoutConfig::default());
    }

    #[test]
    fn stock_defaults_value_is_table() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        assert!(val.get("container_width").is_some());
        assert!(val.get("max_num_rows").is_none());
    }
}
