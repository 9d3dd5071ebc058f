//! Static HTML preview of a computed layout.
//!
//! This is the renderer side of the engine: each [`LayoutBox`] becomes an
//! absolutely positioned element inside a container sized to the layout.
//! Boxes with a `src` field show that image; the rest are drawn as numbered
//! placeholders.
//!
//! The engine always measures from the left. For right-to-left galleries the
//! renderer mirrors each box here (`right = container_width - left - width`).
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.

use crate::types::{Layout, LayoutBox};
use maud::{DOCTYPE, Markup, html};

/// Text direction of the page hosting the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    fn as_attr(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// Format a layout length as CSS pixels, dropping float noise.
fn px(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{rounded}px")
}

/// Inline style positioning one box.
pub fn box_style(b: &LayoutBox, container_width: f64, direction: Direction) -> String {
    let horizontal = match direction {
        Direction::Ltr => format!("left:{}", px(b.left)),
        Direction::Rtl => format!("right:{}", px(container_width - b.left - b.width)),
    };
    format!(
        "position:absolute;top:{};{horizontal};width:{};height:{}",
        px(b.top),
        px(b.width),
        px(b.height)
    )
}

/// The gallery container with all boxes.
pub fn render_gallery(layout: &Layout, container_width: f64, direction: Direction) -> Markup {
    let container_style = format!(
        "position:relative;width:{};height:{}",
        px(container_width),
        px(layout.container_height)
    );
    html! {
        div.gallery dir=(direction.as_attr()) style=(container_style) {
            @for b in &layout.boxes {
                @let style = box_style(b, container_width, direction);
                @match b.extra.get("src").and_then(|v| v.as_str()) {
                    Some(src) => {
                        img.box src=(src) alt="" loading="lazy" style=(style) data-index=(b.index);
                    }
                    None => {
                        div.box.placeholder style=(style) data-index=(b.index) { (b.index + 1) }
                    }
                }
            }
        }
    }
}

/// A complete standalone page around [`render_gallery`].
pub fn render_page(
    title: &str,
    layout: &Layout,
    container_width: f64,
    direction: Direction,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" dir=(direction.as_attr()) {
            head {
                meta charset="utf-8";
                title { (title) }
                style {
                    "body{margin:0;padding:1rem;font-family:sans-serif;background:#f4f4f4}"
                    ".box{object-fit:cover;box-sizing:border-box}"
                    ".placeholder{background:#c8c8c8;color:#555;display:flex;align-items:center;justify-content:center}"
                }
            }
            body {
                p.summary {
                    (layout.boxes.len()) " boxes, "
                    (layout.rows.len()) " rows, "
                    (layout.widow_count) " widows"
                }
                (render_gallery(layout, container_width, direction))
            }
        }
    }
}
