//! Display grid: the prepared table with slot codes replaced by labels.
//!
//! Row kinds are computed once here and travel with the rows, as does the
//! per-cell resolution flag the renderer picks fill colors from.

use crate::grid::{classify_rows, Grid, RowKind};
use crate::slots::SlotMap;
use crate::substitute::substitute;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSource {
    /// Axis column, header row or time row: shown verbatim.
    Axis,
    /// Slot code found in the slot map.
    Resolved,
    /// Slot cell whose code is not in the slot map.
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCell {
    pub text: String,
    pub source: CellSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub kind: RowKind,
    pub cells: Vec<DisplayCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayGrid {
    pub columns: usize,
    pub rows: Vec<DisplayRow>,
}

/// A slot cell that could not be resolved. Rendered with the warning fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedSlot {
    pub row: usize,
    pub column: usize,
    pub text: String,
}

impl DisplayGrid {
    /// Substitute every slot cell of `grid`.
    ///
    /// `columns` is the caller's fixed column count; the renderer rejects rows
    /// of any other length.
    pub fn build(grid: &Grid, columns: usize, slot_map: &SlotMap) -> Self {
        let kinds = classify_rows(grid);
        let rows = grid
            .iter()
            .zip(kinds)
            .map(|(row, kind)| DisplayRow {
                kind,
                cells: row
                    .iter()
                    .enumerate()
                    .map(|(column, text)| display_cell(kind, column, text, slot_map))
                    .collect(),
            })
            .collect();
        Self { columns, rows }
    }

    /// Non-empty slot cells that did not resolve.
    pub fn unresolved(&self) -> Vec<UnresolvedSlot> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, r)| {
                r.cells.iter().enumerate().filter_map(move |(column, cell)| {
                    (cell.source == CellSource::Unresolved && !cell.text.trim().is_empty()).then(
                        || UnresolvedSlot {
                            row,
                            column,
                            text: cell.text.clone(),
                        },
                    )
                })
            })
            .collect()
    }
}

fn display_cell(kind: RowKind, column: usize, text: &str, slot_map: &SlotMap) -> DisplayCell {
    if kind != RowKind::DataRow || column == 0 {
        return DisplayCell {
            text: text.to_string(),
            source: CellSource::Axis,
        };
    }
    let sub = substitute(text, slot_map);
    DisplayCell {
        text: sub.text,
        source: if sub.resolved {
            CellSource::Resolved
        } else {
            CellSource::Unresolved
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn slot_map() -> SlotMap {
        [("A", "Calculus (TP 401)"), ("P1", "Physics Lab LAB")]
            .into_iter()
            .collect()
    }

    #[test]
    fn data_cells_are_substituted_and_flagged() {
        let grid = vec![
            row(&["Day/Time", "08:00 - 08:50", "08:50 - 09:40"]),
            row(&["Day 1", "A", "P1/X"]),
            row(&["Day 2", "Z", ""]),
        ];
        let display = DisplayGrid::build(&grid, 3, &slot_map());

        assert_eq!(display.rows[0].kind, RowKind::AxisHeader);
        assert!(display.rows[0].cells.iter().all(|c| c.source == CellSource::Axis));

        let day1: Vec<_> = display.rows[1]
            .cells
            .iter()
            .map(|c| (c.text.as_str(), c.source))
            .collect();
        assert_eq!(
            day1,
            vec![
                ("Day 1", CellSource::Axis),
                ("Calculus", CellSource::Resolved),
                ("Physics Lab LAB/X", CellSource::Resolved),
            ]
        );

        assert_eq!(
            display.unresolved(),
            vec![UnresolvedSlot {
                row: 2,
                column: 1,
                text: "Z".to_string(),
            }]
        );
    }

    #[test]
    fn time_rows_are_not_substituted() {
        let grid = vec![
            row(&["Day/Time", "1"]),
            row(&["From", "A"]),
        ];
        let display = DisplayGrid::build(&grid, 2, &slot_map());
        assert_eq!(display.rows[1].kind, RowKind::TimeRow);
        assert_eq!(display.rows[1].cells[1].text, "A");
        assert_eq!(display.rows[1].cells[1].source, CellSource::Axis);
    }
}
