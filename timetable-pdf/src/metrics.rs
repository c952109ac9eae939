//! Text width measurement.
//!
//! Wrapping and truncation only ever ask one question: how wide is this
//! string at this weight and size? [`TextMeasure`] is that question. The
//! built-in implementation uses the Adobe AFM advance widths for the PDF
//! standard Helvetica faces; [`TrueTypeMetrics`] reads them from a font file.

use ab_glyph::{Font, FontVec};

use crate::error::{Result, TimetableError};

/// Millimetres per PostScript point.
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// Advance used for characters outside the width tables (average Helvetica glyph).
const FALLBACK_ADVANCE: u16 = 556;

/// Helvetica cap height in 1/1000 em.
const HELVETICA_CAP_HEIGHT: f32 = 718.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
}

pub trait TextMeasure {
    /// Width of `text` in millimetres.
    fn text_width_mm(&self, text: &str, weight: FontWeight, size_pt: f32) -> f32;

    /// Height of capital letters above the baseline, in millimetres.
    fn cap_height_mm(&self, weight: FontWeight, size_pt: f32) -> f32;
}

// ============================================================================
// Built-in Helvetica
// ============================================================================

/// Helvetica advance widths for U+0020..=U+007E.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for U+0020..=U+007E.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn builtin_advance(ch: char, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Regular => &HELVETICA_WIDTHS,
        FontWeight::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    let code = ch as u32;
    if (0x20..=0x7E).contains(&code) {
        table[(code - 0x20) as usize]
    } else {
        FALLBACK_ADVANCE
    }
}

/// Metrics for the PDF standard Helvetica faces.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMetrics;

impl TextMeasure for BuiltinMetrics {
    fn text_width_mm(&self, text: &str, weight: FontWeight, size_pt: f32) -> f32 {
        let units: u32 = text.chars().map(|c| builtin_advance(c, weight) as u32).sum();
        units as f32 / 1000.0 * size_pt * PT_TO_MM
    }

    fn cap_height_mm(&self, _weight: FontWeight, size_pt: f32) -> f32 {
        HELVETICA_CAP_HEIGHT / 1000.0 * size_pt * PT_TO_MM
    }
}

// ============================================================================
// TrueType
// ============================================================================

/// Advance widths read from a regular and a bold TrueType font.
pub struct TrueTypeMetrics {
    regular: FontVec,
    bold: FontVec,
}

impl TrueTypeMetrics {
    pub fn from_bytes(regular: Vec<u8>, bold: Vec<u8>) -> Result<Self> {
        let regular = FontVec::try_from_vec(regular)
            .map_err(|e| TimetableError::Font(format!("regular face: {}", e)))?;
        let bold = FontVec::try_from_vec(bold)
            .map_err(|e| TimetableError::Font(format!("bold face: {}", e)))?;
        Ok(Self { regular, bold })
    }

    fn face(&self, weight: FontWeight) -> &FontVec {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

fn units_per_em(font: &FontVec) -> f32 {
    font.units_per_em().unwrap_or(1000.0)
}

impl TextMeasure for TrueTypeMetrics {
    fn text_width_mm(&self, text: &str, weight: FontWeight, size_pt: f32) -> f32 {
        let font = self.face(weight);
        let units: f32 = text
            .chars()
            .map(|c| font.h_advance_unscaled(font.glyph_id(c)))
            .sum();
        units / units_per_em(font) * size_pt * PT_TO_MM
    }

    fn cap_height_mm(&self, weight: FontWeight, size_pt: f32) -> f32 {
        // ab_glyph does not expose the OS/2 cap height; 70% of the ascent is close
        // for the sans faces this is used with.
        let font = self.face(weight);
        font.ascent_unscaled() * 0.7 / units_per_em(font) * size_pt * PT_TO_MM
    }
}
