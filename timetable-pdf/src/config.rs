//! Render configuration.
//!
//! Everything the renderer needs to know about page geometry, fonts and
//! colors lives in [`RenderConfig`]. Defaults reproduce the dark A3
//! landscape sheet; a JSON file can override any subset of the keys.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, TimetableError};

// ============================================================================
// Constants
// ============================================================================

/// A3 landscape dimensions in mm
const PAGE_WIDTH_MM: f32 = 420.0;
const PAGE_HEIGHT_MM: f32 = 297.0;

/// Margins
const MARGIN_MM: f32 = 10.0;
const BOTTOM_MARGIN_MM: f32 = 15.0;

/// Fixed width of the Day/Time column
const AXIS_COLUMN_WIDTH_MM: f32 = 30.0;

/// Text fitting
const MAX_LINES: usize = 4;
const LINE_HEIGHT_MM: f32 = 10.0;
const TIME_ROW_LINE_HEIGHT_MM: f32 = 12.0;
const CELL_PADDING_MM: f32 = 2.0;

/// Font sizes in points
const TITLE_FONT_SIZE: f32 = 20.0;
const HEADER_FONT_SIZE: f32 = 14.0;
const NORMAL_FONT_SIZE: f32 = 14.0;
const TIME_ROW_FONT_SIZE: f32 = 16.0;

// ============================================================================
// Colors
// ============================================================================

/// 8-bit RGB color, serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);
    pub const WHITE: RgbColor = RgbColor::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to `0.0..=1.0`, as PDF color operators expect.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

impl From<[u8; 3]> for RgbColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<RgbColor> for [u8; 3] {
    fn from(c: RgbColor) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Cell fills, one per cell class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillColors {
    pub lab: RgbColor,
    pub lecture: RgbColor,
    pub unresolved: RgbColor,
    pub axis: RgbColor,
}

impl Default for FillColors {
    fn default() -> Self {
        Self {
            lab: RgbColor::new(0, 255, 0),
            lecture: RgbColor::new(50, 50, 255),
            unresolved: RgbColor::new(50, 50, 50),
            axis: RgbColor::BLACK,
        }
    }
}

// ============================================================================
// Fonts
// ============================================================================

/// Where glyph outlines and advance widths come from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FontSource {
    /// PDF standard Helvetica / Helvetica-Bold.
    #[default]
    Builtin,
    /// A regular and a bold TrueType file, embedded into the document.
    TrueType { regular: PathBuf, bold: PathBuf },
}

// ============================================================================
// Render Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,

    pub axis_column_width: f32,

    pub max_lines_per_cell: usize,
    pub line_height: f32,
    pub time_row_line_height: f32,
    pub min_row_height: f32,
    /// Total horizontal padding subtracted from a column before wrapping.
    pub cell_padding: f32,

    pub font_size: f32,
    pub header_font_size: f32,
    pub time_row_font_size: f32,
    pub title_font_size: f32,
    pub title_height: f32,
    pub title_gap: f32,
    pub title: Option<String>,
    pub font: FontSource,

    pub fill_colors: FillColors,
    pub page_background: Option<RgbColor>,
    pub text_color: RgbColor,
    pub border_color: RgbColor,
    /// Border stroke width in points.
    pub border_thickness: f32,

    pub repeat_header_on_new_page: bool,
    /// Vertically center every data cell instead of only the axis column.
    pub center_data_cells: bool,
    /// Case-insensitive marker identifying lab labels.
    pub lab_marker: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_width: PAGE_WIDTH_MM,
            page_height: PAGE_HEIGHT_MM,
            margin_left: MARGIN_MM,
            margin_right: MARGIN_MM,
            margin_top: MARGIN_MM,
            margin_bottom: BOTTOM_MARGIN_MM,
            axis_column_width: AXIS_COLUMN_WIDTH_MM,
            max_lines_per_cell: MAX_LINES,
            line_height: LINE_HEIGHT_MM,
            time_row_line_height: TIME_ROW_LINE_HEIGHT_MM,
            min_row_height: 0.0,
            cell_padding: CELL_PADDING_MM,
            font_size: NORMAL_FONT_SIZE,
            header_font_size: HEADER_FONT_SIZE,
            time_row_font_size: TIME_ROW_FONT_SIZE,
            title_font_size: TITLE_FONT_SIZE,
            title_height: 12.0,
            title_gap: 4.0,
            title: Some("SRM Timetable".to_string()),
            font: FontSource::Builtin,
            fill_colors: FillColors::default(),
            page_background: Some(RgbColor::BLACK),
            text_color: RgbColor::WHITE,
            border_color: RgbColor::WHITE,
            border_thickness: 0.6,
            repeat_header_on_new_page: true,
            center_data_cells: false,
            lab_marker: "lab".to_string(),
        }
    }
}

impl RenderConfig {
    /// Load a config from JSON. Keys that are absent keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TimetableError::Input(format!("{}: {}", path.display(), e)))?;
        let config: RenderConfig = serde_json::from_str(&content)
            .map_err(|e| TimetableError::Input(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Width between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Y coordinate of the first drawable line on a page (origin bottom-left).
    pub fn content_top(&self) -> f32 {
        self.page_height - self.margin_top
    }

    /// Reject geometry no table could be laid out on.
    pub fn validate(&self) -> Result<()> {
        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return Err(TimetableError::Layout(format!(
                "page size must be positive, got {} x {} mm",
                self.page_width, self.page_height
            )));
        }
        if self.content_top() <= self.margin_bottom {
            return Err(TimetableError::Layout(
                "vertical margins leave no printable height".to_string(),
            ));
        }
        if self.max_lines_per_cell == 0 {
            return Err(TimetableError::Layout(
                "max_lines_per_cell must be at least 1".to_string(),
            ));
        }
        if self.line_height <= 0.0 || self.time_row_line_height <= 0.0 {
            return Err(TimetableError::Layout(
                "line heights must be positive".to_string(),
            ));
        }
        if self.axis_column_width < 0.0 || self.cell_padding < 0.0 {
            return Err(TimetableError::Layout(
                "column width and padding cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}
