//! Normalized containment and threshold fuzzy matching
//!
//! Both sides are folded (diacritics normalized, then lowercased) before
//! comparison. Absent or empty inputs never match.

use crate::distance::similarity;
use crate::input::Input;
use crate::table::DiacriticTable;
use crate::DEFAULT_TABLE;

/// Default acceptance threshold for [`fuzzy_match`].
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Folded `(text, term)` pair, or `None` if either side is absent/empty.
fn fold_pair(table: &DiacriticTable, text: Input<'_>, term: Input<'_>) -> Option<(String, String)> {
    let text = text.present()?;
    let term = term.present()?;
    Some((table.fold(text), table.fold(term)))
}

pub(crate) fn contains_in(table: &DiacriticTable, text: Input<'_>, term: Input<'_>) -> bool {
    fold_pair(table, text, term).is_some_and(|(text, term)| text.contains(&term))
}

pub(crate) fn fuzzy_score_in(table: &DiacriticTable, text: Input<'_>, term: Input<'_>) -> Option<f64> {
    fold_pair(table, text, term).map(|(text, term)| similarity(&text, &term))
}

/// True if `term` occurs in `text` after folding both.
///
/// An empty needle is never a match, unlike `str::contains`.
pub fn contains_normalized<'a, 'b>(text: impl Into<Input<'a>>, term: impl Into<Input<'b>>) -> bool {
    contains_in(&DEFAULT_TABLE, text.into(), term.into())
}

/// Whole-string similarity of the folded inputs, or `None` if either side is
/// absent/empty.
pub fn fuzzy_score<'a, 'b>(text: impl Into<Input<'a>>, term: impl Into<Input<'b>>) -> Option<f64> {
    fuzzy_score_in(&DEFAULT_TABLE, text.into(), term.into())
}

/// True if the folded `text` and `term` are at least `threshold` similar.
///
/// Compares whole strings (no sliding window), so it suits short labels and
/// titles. Thresholds outside `[0, 1]` are not clamped.
pub fn fuzzy_match<'a, 'b>(
    text: impl Into<Input<'a>>,
    term: impl Into<Input<'b>>,
    threshold: f64,
) -> bool {
    fuzzy_score(text, term).is_some_and(|score| score >= threshold)
}

/// [`fuzzy_match`] at [`DEFAULT_THRESHOLD`].
pub fn fuzzy_match_default<'a, 'b>(text: impl Into<Input<'a>>, term: impl Into<Input<'b>>) -> bool {
    fuzzy_match(text, term, DEFAULT_THRESHOLD)
}
