//! Cell text fitting.
//!
//! Greedy word wrap into a column, then truncation to a maximum line count.
//! Order matters: wrap first, cut the line list, then shrink the last kept
//! line until it fits with an ellipsis appended.

use crate::metrics::{FontWeight, TextMeasure};

pub const ELLIPSIS: &str = "...";

/// Font and geometry a cell is fitted against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    /// Full column width in mm.
    pub column_width: f32,
    /// Horizontal padding subtracted from the column width.
    pub padding: f32,
    pub weight: FontWeight,
    pub size_pt: f32,
    pub max_lines: usize,
}

impl FitParams {
    /// Widest a line may measure.
    pub fn max_width(&self) -> f32 {
        (self.column_width - self.padding).max(0.0)
    }
}

/// Between one and `max_lines` lines, each no wider than the column allows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedText {
    lines: Vec<String>,
    truncated: bool,
}

impl WrappedText {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// True when lines were dropped or shortened to fit.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

struct Fitter<'a, M: TextMeasure + ?Sized> {
    measure: &'a M,
    params: &'a FitParams,
}

impl<M: TextMeasure + ?Sized> Fitter<'_, M> {
    fn fits(&self, text: &str) -> bool {
        self.measure
            .text_width_mm(text, self.params.weight, self.params.size_pt)
            <= self.params.max_width()
    }

    /// Greedy wrap on whitespace. Tokens are never split.
    fn wrap(&self, text: &str) -> Vec<String> {
        let mut lines = Vec::new();
        let mut tokens = text.split_whitespace();

        let Some(first) = tokens.next() else {
            return vec![String::new()];
        };
        let mut current = first.to_string();

        for token in tokens {
            let candidate = format!("{} {}", current, token);
            if self.fits(&candidate) {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, token.to_string()));
            }
        }
        lines.push(current);
        lines
    }

    /// Longest prefix of `line` that fits with the ellipsis appended.
    ///
    /// Binary search over the prefix length; widths are additive, so the
    /// predicate is monotone.
    fn with_ellipsis(&self, line: &str) -> String {
        let chars: Vec<char> = line.chars().collect();
        let candidate = |k: usize| {
            let prefix: String = chars[..k].iter().collect();
            format!("{}{}", prefix.trim_end(), ELLIPSIS)
        };

        if !self.fits(&candidate(0)) {
            // Column narrower than the ellipsis itself.
            return (0..ELLIPSIS.len())
                .rev()
                .map(|n| &ELLIPSIS[..n])
                .find(|dots| self.fits(dots))
                .unwrap_or("")
                .to_string();
        }

        let (mut lo, mut hi) = (0, chars.len());
        while lo < hi {
            let mid = (lo + hi + 1) / 2;
            if self.fits(&candidate(mid)) {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        candidate(lo)
    }
}

/// Wrap `text` into at most `params.max_lines` lines that fit the column.
///
/// Never fails: a token wider than the column keeps its own line and is
/// shortened with an ellipsis, and the worst case is an ellipsis alone.
pub fn fit<M: TextMeasure + ?Sized>(text: &str, params: &FitParams, measure: &M) -> WrappedText {
    let fitter = Fitter { measure, params };
    let max_lines = params.max_lines.max(1);

    let mut lines = fitter.wrap(text);
    let mut truncated = false;

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = fitter.with_ellipsis(last);
        }
        truncated = true;
    }

    for line in lines.iter_mut() {
        if !fitter.fits(line) {
            *line = fitter.with_ellipsis(line);
            truncated = true;
        }
    }

    WrappedText { lines, truncated }
}
