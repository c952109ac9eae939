//! Document backend.
//!
//! The renderer only needs a handful of primitives: measure text, draw a
//! rectangle, draw a run of text, start a page, save. [`PdfBackend`]
//! provides them over printpdf; tests substitute an in-memory recorder.
//!
//! Coordinates are millimetres from the bottom-left corner of the page.

use printpdf::path::PaintMode;
use printpdf::*;
use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

use crate::config::{FontSource, RgbColor};
use crate::error::{Result, TimetableError};
use crate::metrics::{BuiltinMetrics, FontWeight, TextMeasure, TrueTypeMetrics};

/// Axis-aligned box given by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn bottom(&self) -> f32 {
        self.top - self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub color: RgbColor,
    /// Stroke width in points.
    pub thickness: f32,
}

pub trait DocumentBackend: TextMeasure {
    /// Fill and/or stroke a rectangle. With neither, nothing is drawn.
    fn draw_rect(&mut self, frame: Frame, fill: Option<RgbColor>, border: Option<Border>);

    /// Draw a single line of text with its baseline at `baseline`.
    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        baseline: f32,
        weight: FontWeight,
        size_pt: f32,
        color: RgbColor,
    );

    /// Append a page; subsequent drawing lands on it.
    fn new_page(&mut self);

    fn page_count(&self) -> usize;

    fn save(self, path: &Path) -> Result<()>
    where
        Self: Sized;
}

// ============================================================================
// printpdf Backend
// ============================================================================

fn pdf_color(color: RgbColor) -> Color {
    let (r, g, b) = color.to_unit();
    Color::Rgb(Rgb::new(r, g, b, None))
}

pub struct PdfBackend {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font_regular: IndirectFontRef,
    font_bold: IndirectFontRef,
    metrics: Box<dyn TextMeasure>,
    page_width: f32,
    page_height: f32,
    pages: usize,
}

impl PdfBackend {
    pub fn new(title: &str, page_width: f32, page_height: f32, font: &FontSource) -> Result<Self> {
        let (doc, page1, layer1) =
            PdfDocument::new(title, Mm(page_width), Mm(page_height), "Layer 1");
        let layer = doc.get_page(page1).get_layer(layer1);

        let (font_regular, font_bold, metrics): (_, _, Box<dyn TextMeasure>) = match font {
            FontSource::Builtin => {
                let regular = doc
                    .add_builtin_font(BuiltinFont::Helvetica)
                    .map_err(|e| TimetableError::Pdf(e.to_string()))?;
                let bold = doc
                    .add_builtin_font(BuiltinFont::HelveticaBold)
                    .map_err(|e| TimetableError::Pdf(e.to_string()))?;
                (regular, bold, Box::new(BuiltinMetrics))
            }
            FontSource::TrueType { regular, bold } => {
                let read = |p: &Path| {
                    std::fs::read(p)
                        .map_err(|e| TimetableError::Font(format!("{}: {}", p.display(), e)))
                };
                let regular_bytes = read(regular.as_path())?;
                let bold_bytes = read(bold.as_path())?;
                let metrics = TrueTypeMetrics::from_bytes(regular_bytes.clone(), bold_bytes.clone())?;
                let regular = doc
                    .add_external_font(Cursor::new(regular_bytes))
                    .map_err(|e| TimetableError::Font(e.to_string()))?;
                let bold = doc
                    .add_external_font(Cursor::new(bold_bytes))
                    .map_err(|e| TimetableError::Font(e.to_string()))?;
                (regular, bold, Box::new(metrics))
            }
        };

        Ok(Self {
            doc,
            layer,
            font_regular,
            font_bold,
            metrics,
            page_width,
            page_height,
            pages: 1,
        })
    }

    fn font(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.font_regular,
            FontWeight::Bold => &self.font_bold,
        }
    }
}

impl TextMeasure for PdfBackend {
    fn text_width_mm(&self, text: &str, weight: FontWeight, size_pt: f32) -> f32 {
        self.metrics.text_width_mm(text, weight, size_pt)
    }

    fn cap_height_mm(&self, weight: FontWeight, size_pt: f32) -> f32 {
        self.metrics.cap_height_mm(weight, size_pt)
    }
}

impl DocumentBackend for PdfBackend {
    fn draw_rect(&mut self, frame: Frame, fill: Option<RgbColor>, border: Option<Border>) {
        let mode = match (fill, border) {
            (Some(_), Some(_)) => PaintMode::FillStroke,
            (Some(_), None) => PaintMode::Fill,
            (None, Some(_)) => PaintMode::Stroke,
            (None, None) => return,
        };
        if let Some(color) = fill {
            self.layer.set_fill_color(pdf_color(color));
        }
        if let Some(border) = border {
            self.layer.set_outline_color(pdf_color(border.color));
            self.layer.set_outline_thickness(border.thickness);
        }

        let rect = Rect::new(
            Mm(frame.x),
            Mm(frame.bottom()),
            Mm(frame.right()),
            Mm(frame.top),
        )
        .with_mode(mode);
        self.layer.add_rect(rect);
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        baseline: f32,
        weight: FontWeight,
        size_pt: f32,
        color: RgbColor,
    ) {
        // Text is painted with the fill color.
        self.layer.set_fill_color(pdf_color(color));
        self.layer
            .use_text(text, size_pt, Mm(x), Mm(baseline), self.font(weight));
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(self.page_width), Mm(self.page_height), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.pages += 1;
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn save(self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.doc
            .save(&mut writer)
            .map_err(|e| TimetableError::Pdf(e.to_string()))?;
        log::info!("saved {} page(s) to {}", self.pages, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_edges() {
        let frame = Frame {
            x: 10.0,
            top: 200.0,
            width: 30.0,
            height: 12.5,
        };
        assert_eq!(frame.bottom(), 187.5);
        assert_eq!(frame.right(), 40.0);
    }

    #[test]
    fn builtin_backend_counts_pages() {
        let mut backend = PdfBackend::new("t", 420.0, 297.0, &FontSource::Builtin).unwrap();
        assert_eq!(backend.page_count(), 1);
        backend.new_page();
        backend.new_page();
        assert_eq!(backend.page_count(), 3);
    }

    #[test]
    fn rects_in_every_paint_mode_are_saved() {
        let mut backend = PdfBackend::new("t", 100.0, 100.0, &FontSource::Builtin).unwrap();
        let frame = Frame {
            x: 5.0,
            top: 95.0,
            width: 20.0,
            height: 10.0,
        };
        let border = Border {
            color: RgbColor::WHITE,
            thickness: 0.6,
        };
        backend.draw_rect(frame, Some(RgbColor::BLACK), Some(border));
        backend.draw_rect(frame, Some(RgbColor::BLACK), None);
        backend.draw_rect(frame, None, Some(border));
        backend.draw_rect(frame, None, None);
        backend.draw_text("Day 1", 7.0, 89.0, FontWeight::Bold, 14.0, RgbColor::WHITE);

        let path = std::env::temp_dir().join("timetable-pdf-paint-modes.pdf");
        backend.save(&path).unwrap();
        let size = std::fs::metadata(&path).unwrap().len();
        std::fs::remove_file(&path).ok();
        assert!(size > 500, "PDF is too small: {} bytes", size);
    }

    #[test]
    fn missing_font_file_is_a_font_error() {
        let font = FontSource::TrueType {
            regular: "does/not/exist.ttf".into(),
            bold: "does/not/exist-bold.ttf".into(),
        };
        let result = PdfBackend::new("t", 420.0, 297.0, &font);
        assert!(matches!(result, Err(TimetableError::Font(_))));
    }
}
