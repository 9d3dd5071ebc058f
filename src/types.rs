//! Input and output types shared by the engine, the CLI and the preview renderer.
//!
//! Items arrive as JSON in any of three shapes and leave as [`LayoutBox`]es.
//! The engine never writes into an [`Item`]; every box is a fresh record that
//! points back at its item through `index`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Box keys the engine computes. Pass-through fields never override them.
pub const COMPUTED_BOX_KEYS: &[&str] = &[
    "index",
    "aspectRatio",
    "top",
    "left",
    "width",
    "height",
    "forcedAspectRatio",
];

#[derive(Error, Debug)]
pub enum ItemsError {
    #[error("Items must be a JSON array: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Item {index} is not a number, {{width, height}} or {{aspectRatio}}: {source}")]
    InvalidItem {
        index: usize,
        source: serde_json::Error,
    },
}

/// Parse a JSON array of items, naming the first item that has no usable shape.
pub fn parse_items(json: &str) -> Result<Vec<Item>, ItemsError> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|source| ItemsError::InvalidItem { index, source })
        })
        .collect()
}

/// One item to lay out.
///
/// Accepted JSON shapes:
/// - `1.5`: a bare aspect ratio
/// - `{"width": 1600, "height": 1200}`: aspect ratio derived as width/height
/// - `{"aspectRatio": 1.5}`: pre-shaped
///
/// Object shapes keep any other keys in `extra`; they are copied onto the
/// output box untouched (e.g. a `src` the renderer needs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    AspectRatio(f64),
    Dimensions {
        width: f64,
        height: f64,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    Shaped {
        #[serde(rename = "aspectRatio", alias = "aspect_ratio")]
        aspect_ratio: f64,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
}

impl Item {
    /// An item with pass-through fields, built from pixel dimensions.
    pub fn from_dimensions(width: u32, height: u32, extra: Map<String, Value>) -> Self {
        Item::Dimensions {
            width: f64::from(width),
            height: f64::from(height),
            extra,
        }
    }

    /// Width divided by height. Not validated here.
    pub fn aspect_ratio(&self) -> f64 {
        match self {
            Item::AspectRatio(ratio) => *ratio,
            Item::Dimensions { width, height, .. } => width / height,
            Item::Shaped { aspect_ratio, .. } => *aspect_ratio,
        }
    }

    /// Pass-through fields carried by object-shaped items.
    pub fn extra(&self) -> Option<&Map<String, Value>> {
        match self {
            Item::AspectRatio(_) => None,
            Item::Dimensions { extra, .. } | Item::Shaped { extra, .. } => Some(extra),
        }
    }

    /// Pass-through fields for the output box, minus any computed key.
    pub fn pass_through(&self) -> Map<String, Value> {
        let mut fields = self.extra().cloned().unwrap_or_default();
        for key in COMPUTED_BOX_KEYS {
            fields.remove(*key);
        }
        fields
    }
}

impl From<f64> for Item {
    fn from(ratio: f64) -> Self {
        Item::AspectRatio(ratio)
    }
}

/// Final geometry for one item, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// A laid-out item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBox {
    /// Position of the item in the input sequence.
    pub index: usize,
    /// Aspect ratio the engine used (the forced one when forcing is on).
    pub aspect_ratio: f64,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub forced_aspect_ratio: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LayoutBox {
    pub fn rect(&self) -> Rect {
        Rect {
            top: self.top,
            left: self.left,
            width: self.width,
            height: self.height,
        }
    }
}

/// Per-row bookkeeping kept alongside the flat box list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSummary {
    pub top: f64,
    pub height: f64,
    pub item_count: usize,
    pub is_breakout: bool,
    pub is_widow: bool,
}

/// Result of one `compute` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub container_height: f64,
    pub widow_count: usize,
    pub boxes: Vec<LayoutBox>,
    #[serde(skip)]
    pub rows: Vec<RowSummary>,
}
