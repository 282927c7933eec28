//! Multi-term OR search and substring-frequency counting

use crate::input::Input;
use crate::matcher::contains_in;
use crate::table::DiacriticTable;
use crate::DEFAULT_TABLE;

pub(crate) fn multi_search_in<S: AsRef<str>>(table: &DiacriticTable, text: Input<'_>, terms: &[S]) -> bool {
    if !text.is_present() {
        return false;
    }
    terms
        .iter()
        .any(|term| contains_in(table, text, Input::from(term.as_ref())))
}

pub(crate) fn word_frequency_in(table: &DiacriticTable, text: Input<'_>, term: Input<'_>) -> usize {
    let (Some(text), Some(term)) = (text.present(), term.present()) else {
        return 0;
    };
    let text = table.fold(text);
    let term = table.fold(term);
    let subterms: Vec<&str> = term.split_whitespace().collect();

    text.split_whitespace()
        .map(|word| subterms.iter().filter(|sub| word.contains(*sub)).count())
        .sum()
}

/// True if any of `terms` is contained in `text` (normalized, short-circuits).
pub fn multi_search<'a, S: AsRef<str>>(text: impl Into<Input<'a>>, terms: &[S]) -> bool {
    multi_search_in(&DEFAULT_TABLE, text.into(), terms)
}

/// Number of `(word, subterm)` pairs where the folded word contains the
/// folded subterm.
///
/// This is an occurrence count, not a document frequency: a word holding two
/// subterms counts twice.
pub fn word_frequency<'a, 'b>(text: impl Into<Input<'a>>, term: impl Into<Input<'b>>) -> usize {
    word_frequency_in(&DEFAULT_TABLE, text.into(), term.into())
}
