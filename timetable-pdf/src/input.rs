//! Input handed over by the page-extraction step.
//!
//! Both tables arrive as raw rows of cell text:
//!
//! ```json
//! {
//!   "course_rows": [["1", "21BT301", "Molecular Biology", "...", "B", "..."]],
//!   "grid": [["Day 1", "A", "P1/X", "...", "", ""]],
//!   "title": "Unified Time Table - Batch 1"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TimetableError};
use crate::grid::Grid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimetableInput {
    /// Registered-course table rows, header row excluded.
    pub course_rows: Option<Vec<Vec<String>>>,
    /// Unified timetable rows as scraped.
    pub grid: Option<Grid>,
    pub title: Option<String>,
    /// Period labels for the header row; the standard ten when absent.
    pub column_labels: Option<Vec<String>>,
}

impl TimetableInput {
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| TimetableError::Input(format!("Invalid JSON: {}", e)))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TimetableError::Input(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    pub fn course_rows(&self) -> Result<&[Vec<String>]> {
        self.course_rows
            .as_deref()
            .ok_or_else(|| TimetableError::MissingTable("course table".to_string()))
    }

    pub fn grid(&self) -> Result<&Grid> {
        match &self.grid {
            Some(grid) if !grid.is_empty() => Ok(grid),
            _ => Err(TimetableError::MissingTable("timetable grid".to_string())),
        }
    }
}
