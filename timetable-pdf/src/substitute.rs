//! Slot substitution: raw grid cell text to display text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::slots::SlotMap;

/// Innermost parenthesized span; applied repeatedly to peel nested ones.
static PAREN_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^()]*\)").unwrap());

/// Display text for one cell and whether its code was found in the slot map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub text: String,
    pub resolved: bool,
}

impl Substitution {
    fn resolved(text: String) -> Self {
        Self {
            text,
            resolved: true,
        }
    }

    fn unresolved(text: String) -> Self {
        Self {
            text,
            resolved: false,
        }
    }
}

/// Remove every balanced `(...)` span and collapse the leftover whitespace.
///
/// Unbalanced parentheses are left as they are.
pub fn strip_annotations(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = PAREN_SPAN.replace_all(&current, " ");
        if next == current {
            break;
        }
        current = next.into_owned();
    }
    current.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rewrite a cell's slot code into its subject label.
///
/// A compound `base/suffix` cell keeps its suffix after the label
/// (`"P2/X"` becomes `"Chem Lab/X"`); an unknown base leaves the cell
/// untouched. Plain text that is not a code only loses stray room
/// annotations.
pub fn substitute(cell_text: &str, slot_map: &SlotMap) -> Substitution {
    if let Some((base, suffix)) = cell_text.split_once('/') {
        return match slot_map.get(base.trim()) {
            Some(label) => {
                let label = strip_annotations(label);
                let suffix = suffix.trim();
                if suffix.is_empty() {
                    Substitution::resolved(label)
                } else {
                    Substitution::resolved(format!("{}/{}", label, suffix))
                }
            }
            None => Substitution::unresolved(cell_text.to_string()),
        };
    }

    match slot_map.get(cell_text.trim()) {
        Some(label) => Substitution::resolved(strip_annotations(label)),
        None => Substitution::unresolved(strip_annotations(cell_text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn slot_map() -> SlotMap {
        [
            ("B", "Molecular Biology (B103)"),
            ("P2", "Chem Lab (R204)"),
            ("P3", "Chem Lab LAB"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn theory_code_strips_room() {
        assert_eq!(
            substitute("B", &slot_map()),
            Substitution {
                text: "Molecular Biology".to_string(),
                resolved: true,
            }
        );
    }

    #[test]
    fn compound_code_keeps_suffix() {
        let result = substitute("P2/X", &slot_map());
        assert_eq!(result.text, "Chem Lab/X");
        assert!(result.resolved);
    }

    #[test]
    fn compound_code_with_empty_suffix() {
        let result = substitute("P3/", &slot_map());
        assert_eq!(result.text, "Chem Lab LAB");
        assert!(result.resolved);
    }

    #[test]
    fn unknown_compound_code_passes_through() {
        let result = substitute("Q9/X (R1)", &slot_map());
        assert_eq!(result.text, "Q9/X (R1)");
        assert!(!result.resolved);
    }

    #[test]
    fn unknown_plain_text_loses_annotations() {
        let result = substitute("Day 1  (Main   Block)", &slot_map());
        assert_eq!(result.text, "Day 1");
        assert!(!result.resolved);
    }

    #[test]
    fn surrounding_whitespace_is_ignored_for_lookup() {
        assert!(substitute("  B ", &slot_map()).resolved);
    }

    #[test]
    fn nested_annotations_are_removed() {
        assert_eq!(strip_annotations("Lab (Block (East) 3) A"), "Lab A");
    }

    #[test]
    fn unbalanced_parenthesis_is_kept() {
        assert_eq!(strip_annotations("Lab (R204"), "Lab (R204");
    }

    #[test]
    fn substitution_is_idempotent_on_non_codes() {
        let map = slot_map();
        for text in ["Day 3", "x (y) z", "Q9/X", "", "  spaced   out  ", "a)(b"] {
            let once = substitute(text, &map).text;
            let twice = substitute(&once, &map).text;
            assert_eq!(once, twice, "input {:?}", text);
        }
    }
}
