//! Slot resolution.
//!
//! Turns the rows of the registered-courses table into a [`SlotMap`] from
//! slot code to subject label. Theory rows carry a single code (`"B"`); lab
//! rows carry a dash-joined run of codes (`"P1-P2-P3-"`), each of which maps
//! to the subject with a `LAB` marker appended.

use std::collections::BTreeMap;

/// Appended to every lab-derived label.
pub const LAB_SUFFIX: &str = "LAB";

/// Separator between the codes of a lab session.
const LAB_SEPARATOR: char = '-';

/// Cell positions of the fields the resolver reads from a raw course row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotColumns {
    pub subject: usize,
    pub slot: usize,
    /// Rows with fewer cells than this are skipped.
    pub min_cells: usize,
}

impl Default for SlotColumns {
    fn default() -> Self {
        Self {
            subject: 2,
            slot: 8,
            min_cells: 11,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Theory,
    Lab,
}

/// Immutable mapping from slot code to display label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotMap {
    entries: BTreeMap<String, String>,
}

impl SlotMap {
    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, code: &str, label: String) {
        if let Some(previous) = self.entries.insert(code.to_string(), label) {
            // Last row wins; the table is assumed consistent.
            log::debug!(
                "slot {} redefined: {:?} replaced by {:?}",
                code,
                previous,
                self.entries[code]
            );
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SlotMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .filter(|(k, _)| !k.is_empty())
                .collect(),
        }
    }
}

/// Split a raw slot string into its codes and session kind.
///
/// Any `-` makes the row a lab session, even with a single code (`"P7-"`).
/// Returns `None` when the string holds no code at all.
pub fn parse_slot_codes(raw: &str) -> Option<(SlotKind, Vec<&str>)> {
    let raw = raw.trim();
    if raw.contains(LAB_SEPARATOR) {
        let codes: Vec<&str> = raw
            .split(LAB_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if codes.is_empty() {
            None
        } else {
            Some((SlotKind::Lab, codes))
        }
    } else if raw.is_empty() {
        None
    } else {
        Some((SlotKind::Theory, vec![raw]))
    }
}

/// Build the slot map from raw course rows.
pub fn resolve<R: AsRef<[String]>>(rows: &[R], columns: &SlotColumns) -> SlotMap {
    let mut map = SlotMap::default();

    for row in rows {
        let cells = row.as_ref();
        if cells.len() < columns.min_cells.max(columns.subject + 1).max(columns.slot + 1) {
            continue;
        }

        let subject = cells[columns.subject].trim();
        let Some((kind, codes)) = parse_slot_codes(&cells[columns.slot]) else {
            continue;
        };

        let label = match kind {
            SlotKind::Lab => format!("{} {}", subject, LAB_SUFFIX),
            SlotKind::Theory => subject.to_string(),
        };
        for code in codes {
            map.insert(code, label.clone());
        }
    }

    log::debug!("resolved {} slot codes", map.len());
    map
}
