//! Grid renderer.
//!
//! Allocates column widths, fits every cell, lays out each row and draws the
//! table through a [`DocumentBackend`], starting a new page whenever the next
//! row would cross the bottom margin.

use crate::backend::{Border, DocumentBackend, Frame};
use crate::config::{RenderConfig, RgbColor};
use crate::display::{CellSource, DisplayCell, DisplayGrid, DisplayRow, UnresolvedSlot};
use crate::error::{Result, TimetableError};
use crate::fit::{fit, FitParams, WrappedText};
use crate::grid::RowKind;
use crate::metrics::{FontWeight, TextMeasure};
use crate::row_layout::{cell_alignment, layout_row, RowLayout, RowMetrics};

/// Fill class of a drawn cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFill {
    Axis,
    Lab,
    Lecture,
    Unresolved,
}

/// Pick the fill class: axis cells keep the axis fill whatever they say,
/// unresolved slots get the warning fill, and resolved labels are split on
/// the lab marker.
pub fn classify_fill(cell: &DisplayCell, lab_marker: &str) -> CellFill {
    match cell.source {
        CellSource::Axis => CellFill::Axis,
        CellSource::Unresolved => CellFill::Unresolved,
        CellSource::Resolved => {
            if cell
                .text
                .to_lowercase()
                .contains(&lab_marker.to_lowercase())
            {
                CellFill::Lab
            } else {
                CellFill::Lecture
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub pages: usize,
    pub rows: usize,
    pub unresolved: Vec<UnresolvedSlot>,
}

/// A row with every cell fitted and its height known.
struct PreparedRow {
    kind: RowKind,
    cells: Vec<WrappedText>,
    fills: Vec<CellFill>,
    layout: RowLayout,
    weight: FontWeight,
    size_pt: f32,
    line_height: f32,
}

pub struct GridRenderer {
    config: RenderConfig,
}

impl GridRenderer {
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Fixed axis column, equal split of the remaining content width.
    pub fn column_widths(&self, columns: usize) -> Result<Vec<f32>> {
        if columns == 0 {
            return Err(TimetableError::Layout("table has no columns".to_string()));
        }
        let usable = self.config.content_width();
        let axis = self.config.axis_column_width;
        if usable <= axis {
            return Err(TimetableError::Layout(format!(
                "content width {:.1} mm leaves no room beside the {:.1} mm axis column",
                usable, axis
            )));
        }

        let mut widths = vec![axis];
        if columns > 1 {
            let other = (usable - axis) / (columns - 1) as f32;
            widths.extend(std::iter::repeat(other).take(columns - 1));
        }
        Ok(widths)
    }

    fn text_style(&self, kind: RowKind) -> (FontWeight, f32) {
        match kind {
            RowKind::AxisHeader => (FontWeight::Bold, self.config.header_font_size),
            RowKind::TimeRow => (FontWeight::Bold, self.config.time_row_font_size),
            RowKind::DataRow => (FontWeight::Regular, self.config.font_size),
        }
    }

    fn fill_color(&self, fill: CellFill) -> RgbColor {
        let colors = &self.config.fill_colors;
        match fill {
            CellFill::Axis => colors.axis,
            CellFill::Lab => colors.lab,
            CellFill::Lecture => colors.lecture,
            CellFill::Unresolved => colors.unresolved,
        }
    }

    fn border(&self) -> Border {
        Border {
            color: self.config.border_color,
            thickness: self.config.border_thickness,
        }
    }

    fn prepare_row<M: TextMeasure + ?Sized>(
        &self,
        row: &DisplayRow,
        widths: &[f32],
        measure: &M,
    ) -> PreparedRow {
        let (weight, size_pt) = self.text_style(row.kind);
        let metrics = RowMetrics::for_kind(row.kind, &self.config);

        let cells: Vec<WrappedText> = row
            .cells
            .iter()
            .zip(widths)
            .map(|(cell, &column_width)| {
                let params = FitParams {
                    column_width,
                    padding: self.config.cell_padding,
                    weight,
                    size_pt,
                    max_lines: self.config.max_lines_per_cell,
                };
                fit(&cell.text, &params, measure)
            })
            .collect();

        let align: Vec<_> = (0..cells.len())
            .map(|column| cell_alignment(row.kind, column, self.config.center_data_cells))
            .collect();
        let layout = layout_row(&cells, &align, metrics);

        let fills = row
            .cells
            .iter()
            .map(|cell| classify_fill(cell, &self.config.lab_marker))
            .collect();

        PreparedRow {
            kind: row.kind,
            cells,
            fills,
            layout,
            weight,
            size_pt,
            line_height: metrics.line_height,
        }
    }

    /// Draw the whole table.
    ///
    /// Fails only on degenerate geometry: no columns, no room beside the axis
    /// column, or a row whose length differs from the column count.
    pub fn render<B: DocumentBackend>(
        &self,
        grid: &DisplayGrid,
        backend: &mut B,
    ) -> Result<RenderReport> {
        let widths = self.column_widths(grid.columns)?;
        if let Some((i, row)) = grid
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.cells.len() != grid.columns)
        {
            return Err(TimetableError::Layout(format!(
                "row {} has {} cells, expected {}",
                i,
                row.cells.len(),
                grid.columns
            )));
        }

        let rows: Vec<PreparedRow> = grid
            .rows
            .iter()
            .map(|row| self.prepare_row(row, &widths, &*backend))
            .collect();
        let header = rows.iter().find(|r| r.kind == RowKind::AxisHeader);

        let unresolved = grid.unresolved();
        for slot in &unresolved {
            log::warn!(
                "unresolved slot {:?} at row {}, column {}",
                slot.text,
                slot.row,
                slot.column
            );
        }

        self.draw_page_background(backend);
        let mut y = self.config.content_top();
        // The title counts as content: a row that does not fit below it moves on.
        let mut page_has_content = false;
        if let Some(title) = &self.config.title {
            y = self.draw_title(backend, title, y);
            page_has_content = true;
        }

        let bottom = self.config.margin_bottom;
        for (i, row) in rows.iter().enumerate() {
            if page_has_content && y - row.layout.height < bottom {
                backend.new_page();
                log::debug!("row {} starts page {}", i, backend.page_count());
                self.draw_page_background(backend);
                y = self.config.content_top();
                page_has_content = false;

                let repeat = header.filter(|_| {
                    self.config.repeat_header_on_new_page && row.kind != RowKind::AxisHeader
                });
                if let Some(header) = repeat {
                    if y - header.layout.height - row.layout.height >= bottom {
                        self.draw_row(backend, header, &widths, y);
                        y -= header.layout.height;
                    } else {
                        log::debug!("row {} leaves no room for the repeated header", i);
                    }
                }
            }

            self.draw_row(backend, row, &widths, y);
            y -= row.layout.height;
            page_has_content = true;
        }

        Ok(RenderReport {
            pages: backend.page_count(),
            rows: rows.len(),
            unresolved,
        })
    }

    fn draw_page_background<B: DocumentBackend>(&self, backend: &mut B) {
        if let Some(color) = self.config.page_background {
            let frame = Frame {
                x: 0.0,
                top: self.config.page_height,
                width: self.config.page_width,
                height: self.config.page_height,
            };
            backend.draw_rect(frame, Some(color), None);
        }
    }

    /// Centered bold title; returns the y position below it.
    fn draw_title<B: DocumentBackend>(&self, backend: &mut B, title: &str, top: f32) -> f32 {
        let size = self.config.title_font_size;
        let width = backend.text_width_mm(title, FontWeight::Bold, size);
        let cap = backend.cap_height_mm(FontWeight::Bold, size);
        let x = self.config.margin_left + (self.config.content_width() - width) / 2.0;
        let baseline = top - (self.config.title_height + cap) / 2.0;
        backend.draw_text(title, x, baseline, FontWeight::Bold, size, self.config.text_color);
        top - self.config.title_height - self.config.title_gap
    }

    /// Border and fill first, then the text, left to right.
    fn draw_row<B: DocumentBackend>(&self, backend: &mut B, row: &PreparedRow, widths: &[f32], top: f32) {
        let cap = backend.cap_height_mm(row.weight, row.size_pt);
        let mut x = self.config.margin_left;

        for (column, width) in widths.iter().enumerate() {
            let frame = Frame {
                x,
                top,
                width: *width,
                height: row.layout.height,
            };
            backend.draw_rect(
                frame,
                Some(self.fill_color(row.fills[column])),
                Some(self.border()),
            );

            let text_top = top - row.layout.offsets[column];
            for (j, line) in row.cells[column].lines().iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let line_top = text_top - j as f32 * row.line_height;
                let baseline = line_top - (row.line_height + cap) / 2.0;
                let text_width = backend.text_width_mm(line, row.weight, row.size_pt);
                let text_x = x + (width - text_width) / 2.0;
                backend.draw_text(
                    line,
                    text_x,
                    baseline,
                    row.weight,
                    row.size_pt,
                    self.config.text_color,
                );
            }

            x += width;
        }
    }
}
