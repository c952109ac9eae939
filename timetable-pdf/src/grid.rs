//! Grid preparation.
//!
//! The raw grid scraped from the unified timetable holds every table row,
//! including repeated day rows and two always-empty trailing cells. Each
//! stage here takes a grid and returns a new one, so the pipeline can be
//! assembled (and tested) one step at a time.

use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered rows of ordered cell texts.
pub type Grid = Vec<Vec<String>>;

static DAY_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Day\s+\d+$").unwrap());

/// Words in a first cell that mark a time/hour row.
const TIME_ROW_MARKERS: [&str; 5] = ["time", "hour", "order", "from", "to"];

pub const AXIS_LABEL: &str = "Day/Time";

/// Standard period boundaries, one per data column.
pub const PERIOD_LABELS: [&str; 10] = [
    "08:00 - 08:50",
    "08:50 - 09:40",
    "09:45 - 10:35",
    "10:40 - 11:30",
    "11:35 - 12:25",
    "12:30 - 01:20",
    "01:25 - 02:15",
    "02:20 - 03:10",
    "03:10 - 04:00",
    "04:00 - 04:50",
];

// ============================================================================
// Row Classification
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Column labels; always the first row.
    AxisHeader,
    /// Hour order / from / to rows: emphasized, never slot-substituted.
    TimeRow,
    DataRow,
}

/// Classify a row from its position and first cell.
pub fn classify_row(index: usize, first_cell: &str) -> RowKind {
    if index == 0 {
        return RowKind::AxisHeader;
    }
    let lower = first_cell.to_lowercase();
    let is_time_row = lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| TIME_ROW_MARKERS.contains(&word));
    if is_time_row {
        RowKind::TimeRow
    } else {
        RowKind::DataRow
    }
}

/// Classify every row of a grid once.
pub fn classify_rows(grid: &Grid) -> Vec<RowKind> {
    grid.iter()
        .enumerate()
        .map(|(i, row)| classify_row(i, row.first().map(String::as_str).unwrap_or("")))
        .collect()
}

// ============================================================================
// Transform Stages
// ============================================================================

/// Keep only rows whose first cell reads `Day <n>`.
pub fn select_day_rows(grid: &Grid) -> Grid {
    grid.iter()
        .filter(|row| row.first().is_some_and(|c| DAY_LABEL.is_match(c.trim())))
        .cloned()
        .collect()
}

/// Remove the last `n` cells from every row.
pub fn drop_trailing_columns(grid: &Grid, n: usize) -> Grid {
    grid.iter()
        .map(|row| row[..row.len().saturating_sub(n)].to_vec())
        .collect()
}

/// Drop exact duplicate rows, keeping the first occurrence.
pub fn dedup_rows(grid: &Grid) -> Grid {
    let mut seen = std::collections::HashSet::new();
    grid.iter()
        .filter(|row| seen.insert(*row))
        .cloned()
        .collect()
}

/// Pad short rows with empty cells and cut long ones to `width`.
pub fn pad_rows(grid: &Grid, width: usize) -> Grid {
    grid.iter()
        .map(|row| {
            let mut row: Vec<String> = row.iter().take(width).cloned().collect();
            row.resize(width, String::new());
            row
        })
        .collect()
}

/// Prepend the header row.
pub fn with_header<S: AsRef<str>>(grid: &Grid, axis_label: &str, column_labels: &[S]) -> Grid {
    let header = std::iter::once(axis_label.to_string())
        .chain(column_labels.iter().map(|s| s.as_ref().to_string()))
        .collect();
    std::iter::once(header).chain(grid.iter().cloned()).collect()
}

/// Replace en-dashes, which the standard PDF fonts cannot always show.
pub fn normalize_text(cell: &str) -> String {
    cell.replace('\u{2013}', "-")
}

pub fn normalize_cells(grid: &Grid) -> Grid {
    grid.iter()
        .map(|row| row.iter().map(|c| normalize_text(c)).collect())
        .collect()
}

// ============================================================================
// Pipeline
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GridOptions {
    /// Cells at the end of each scraped row that never carry data.
    pub trailing_columns: usize,
    pub axis_label: String,
    pub column_labels: Vec<String>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            trailing_columns: 2,
            axis_label: AXIS_LABEL.to_string(),
            column_labels: PERIOD_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GridOptions {
    pub fn column_count(&self) -> usize {
        self.column_labels.len() + 1
    }
}

/// Raw scraped rows to the display-ready table (before slot substitution).
pub fn prepare(raw: &Grid, options: &GridOptions) -> Grid {
    let days = select_day_rows(raw);
    let trimmed = drop_trailing_columns(&days, options.trailing_columns);
    let unique = dedup_rows(&trimmed);
    let sized = pad_rows(&unique, options.column_count());
    let table = with_header(&sized, &options.axis_label, &options.column_labels);
    normalize_cells(&table)
}
