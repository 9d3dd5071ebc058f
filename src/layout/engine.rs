//! Row orchestration: turns a sequence of items into a full layout.

use super::row::{CompletedRow, Row, RowItem, RowParams, RowState};
use crate::config::{ConfigError, LayoutConfig, ResolvedConfig};
use crate::types::{Item, Layout, LayoutBox, RowSummary};
use log::debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Item {index} has an invalid aspect ratio: {value}")]
    InvalidAspectRatio { index: usize, value: f64 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A layout engine bound to one validated configuration.
///
/// The engine holds no per-call state, so one instance can serve any number
/// of `compute` calls, from any number of threads.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: ResolvedConfig,
}

impl LayoutEngine {
    pub fn new(config: &LayoutConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.resolve()?,
        })
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Lay out `items` in order.
    ///
    /// Fails without partial output if any item reached by the layout has an
    /// aspect ratio that is not a positive finite number.
    pub fn compute(&self, items: &[Item]) -> Result<Layout, LayoutError> {
        let mut run = LayoutRun::new(&self.config, items);

        if self.config.max_num_rows == Some(0) {
            debug!("max_num_rows is 0, dropping all {} items", items.len());
            return Ok(run.finish());
        }

        let mut current: Option<Row> = None;
        'items: for (index, item) in items.iter().enumerate() {
            let aspect_ratio = self
                .config
                .force_aspect_ratio
                .unwrap_or_else(|| item.aspect_ratio());
            if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
                return Err(LayoutError::InvalidAspectRatio {
                    index,
                    value: aspect_ratio,
                });
            }

            // A rejected item goes round once more, onto a fresh row, which
            // always accepts its first item.
            let mut pending = Some(RowItem {
                index,
                aspect_ratio,
            });
            while let Some(row_item) = pending.take() {
                let row = current.take().unwrap_or_else(|| run.new_row());
                match row.add_item(row_item) {
                    RowState::Building(row) => current = Some(row),
                    RowState::Complete { row, rejected } => {
                        run.add_row(row, false);
                        if run.max_rows_reached() {
                            let dropped = items.len() - index - usize::from(rejected.is_none());
                            debug!("row limit reached, dropping {dropped} items");
                            break 'items;
                        }
                        pending = rejected;
                    }
                }
            }
        }

        if let Some(row) = current {
            if self.config.show_widows {
                let row_height = run.last_row().map(|last| {
                    if last.is_breakout {
                        last.target_row_height
                    } else {
                        last.height
                    }
                });
                let widows = row.force_complete(row_height);
                run.widow_count = widows.len();
                run.add_row(widows, true);
            } else {
                debug!("hiding {} widows", row.items().len());
            }
        }

        Ok(run.finish())
    }
}

/// Lay out `items` with `config` in one call.
pub fn compute(items: &[Item], config: &LayoutConfig) -> Result<Layout, LayoutError> {
    LayoutEngine::new(config)?.compute(items)
}

/// Working state of one `compute` call.
struct LayoutRun<'a> {
    config: &'a ResolvedConfig,
    items: &'a [Item],
    container_height: f64,
    rows: Vec<RowSummary>,
    last_row: Option<CompletedRow>,
    boxes: Vec<LayoutBox>,
    widow_count: usize,
}

impl<'a> LayoutRun<'a> {
    fn new(config: &'a ResolvedConfig, items: &'a [Item]) -> Self {
        Self {
            config,
            items,
            container_height: config.padding.top,
            rows: Vec::new(),
            last_row: None,
            boxes: Vec::new(),
            widow_count: 0,
        }
    }

    fn new_row(&self) -> Row {
        let is_breakout = self
            .config
            .breakout_cadence
            .is_some_and(|cadence| (self.rows.len() + 1) % cadence == 0);
        Row::new(RowParams {
            top: self.container_height,
            left: self.config.padding.left,
            width: self.config.row_width(),
            spacing: self.config.spacing.horizontal,
            target_row_height: self.config.target_row_height,
            target_row_height_tolerance: self.config.target_row_height_tolerance,
            is_breakout,
            widow_layout_style: self.config.widow_layout_style,
        })
    }

    fn last_row(&self) -> Option<&CompletedRow> {
        self.last_row.as_ref()
    }

    fn max_rows_reached(&self) -> bool {
        self.config
            .max_num_rows
            .is_some_and(|max| self.rows.len() >= max)
    }

    /// Append a finished row's boxes and advance the container height.
    fn add_row(&mut self, row: CompletedRow, is_widow: bool) {
        let forced = self.config.force_aspect_ratio.is_some();
        let items = self.items;
        self.boxes
            .extend(row.items.iter().zip(&row.rects).map(|(item, rect)| LayoutBox {
                index: item.index,
                aspect_ratio: item.aspect_ratio,
                top: rect.top,
                left: rect.left,
                width: rect.width,
                height: rect.height,
                forced_aspect_ratio: forced,
                extra: items[item.index].pass_through(),
            }));
        self.rows.push(RowSummary {
            top: row.top,
            height: row.height,
            item_count: row.len(),
            is_breakout: row.is_breakout,
            is_widow,
        });
        self.container_height += row.height + self.config.spacing.vertical;
        self.last_row = Some(row);
    }

    fn finish(self) -> Layout {
        let mut container_height = self.container_height;
        if !self.rows.is_empty() {
            container_height -= self.config.spacing.vertical;
        }
        container_height += self.config.padding.bottom;
        debug!(
            "laid out {} boxes in {} rows ({} widows), container height {container_height}",
            self.boxes.len(),
            self.rows.len(),
            self.widow_count
        );
        Layout {
            container_height,
            widow_count: self.widow_count,
            boxes: self.boxes,
            rows: self.rows,
        }
    }
}
