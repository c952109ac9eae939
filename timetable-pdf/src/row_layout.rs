//! Row layout: shared row height and per-cell vertical offsets.

use crate::config::RenderConfig;
use crate::fit::WrappedText;
use crate::grid::RowKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMetrics {
    pub line_height: f32,
    pub min_row_height: f32,
}

impl RowMetrics {
    pub fn for_kind(kind: RowKind, config: &RenderConfig) -> Self {
        let line_height = match kind {
            RowKind::TimeRow => config.time_row_line_height,
            RowKind::AxisHeader | RowKind::DataRow => config.line_height,
        };
        Self {
            line_height,
            min_row_height: config.min_row_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    pub height: f32,
    /// Distance from the row's top edge to each cell's first line.
    pub offsets: Vec<f32>,
}

/// Vertical placement of a cell.
///
/// Header and time rows center everything; data rows center the axis column
/// and top-align slot cells unless `center_data_cells` is set.
pub fn cell_alignment(kind: RowKind, column: usize, center_data_cells: bool) -> VerticalAlign {
    match kind {
        RowKind::AxisHeader | RowKind::TimeRow => VerticalAlign::Center,
        RowKind::DataRow if column == 0 || center_data_cells => VerticalAlign::Center,
        RowKind::DataRow => VerticalAlign::Top,
    }
}

/// Height of the tallest cell (at least `min_row_height`) and where each
/// cell's text block starts within it.
pub fn layout_row(cells: &[WrappedText], align: &[VerticalAlign], metrics: RowMetrics) -> RowLayout {
    let text_height = |cell: &WrappedText| cell.line_count() as f32 * metrics.line_height;

    let height = cells
        .iter()
        .map(text_height)
        .fold(metrics.min_row_height, f32::max);

    let offsets = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| match align.get(i).copied().unwrap_or(VerticalAlign::Top) {
            VerticalAlign::Center => (height - text_height(cell)) / 2.0,
            VerticalAlign::Top => 0.0,
        })
        .collect();

    RowLayout { height, offsets }
}
