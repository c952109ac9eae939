//! timetable-pdf: render a scraped semester timetable as a color-coded PDF.
//!
//! Pipeline, leaves first:
//!
//! 1. [`slots::resolve`] builds the slot code → subject map from the course table.
//! 2. [`grid::prepare`] cleans the raw unified-timetable rows.
//! 3. [`display::DisplayGrid::build`] substitutes slot codes with labels.
//! 4. [`render::GridRenderer`] fits, lays out and draws the table through a
//!    [`backend::DocumentBackend`].

pub mod backend;
pub mod config;
pub mod display;
pub mod error;
pub mod fit;
pub mod grid;
pub mod input;
pub mod metrics;
pub mod render;
pub mod row_layout;
pub mod slots;
pub mod substitute;

use std::path::Path;

pub use config::{FillColors, FontSource, RenderConfig, RgbColor};
pub use error::{Result, TimetableError};
pub use input::TimetableInput;
pub use render::{GridRenderer, RenderReport};

use backend::{DocumentBackend, PdfBackend};
use display::DisplayGrid;
use grid::GridOptions;
use slots::{SlotColumns, SlotMap};

/// Resolve the slot map and build the display grid from extracted tables.
pub fn build_display_grid(input: &TimetableInput) -> Result<(DisplayGrid, SlotMap)> {
    let slot_map = slots::resolve(input.course_rows()?, &SlotColumns::default());
    let raw = input.grid()?;

    let mut options = GridOptions::default();
    if let Some(labels) = &input.column_labels {
        options.column_labels = labels.clone();
    }

    let table = grid::prepare(raw, &options);
    if table.len() == 1 {
        log::warn!("no day rows found in the timetable grid");
    }
    let display = DisplayGrid::build(&table, options.column_count(), &slot_map);
    Ok((display, slot_map))
}

/// Render `input` to a PDF file at `output_path`.
pub fn generate_pdf(
    input: &TimetableInput,
    config: RenderConfig,
    output_path: &Path,
) -> Result<RenderReport> {
    let (display, slot_map) = build_display_grid(input)?;
    log::debug!(
        "{} slot codes, {} table rows",
        slot_map.len(),
        display.rows.len()
    );

    let renderer = GridRenderer::new(config)?;
    let config = renderer.config();
    let doc_title = config.title.as_deref().unwrap_or("Timetable");
    let mut backend = PdfBackend::new(doc_title, config.page_width, config.page_height, &config.font)?;

    let report = renderer.render(&display, &mut backend)?;
    backend.save(output_path)?;
    Ok(report)
}
