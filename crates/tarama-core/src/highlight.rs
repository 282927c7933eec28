//! Query highlighting over the original (non-normalized) text
//!
//! The matcher folds both sides; the highlighter cannot, because it has to
//! wrap the caller's original characters. Instead each query term is turned
//! into a tolerant pattern where every base letter becomes a character class
//! of its variants, taken from the same [`DiacriticTable`].
//!
//! All spans for all terms are collected against the original text first,
//! merged, and wrapped in one pass, so overlapping terms never nest or split
//! markup.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::input::Input;
use crate::table::DiacriticTable;
use crate::DEFAULT_TABLE;

/// Half-open byte range `[start, end)` into the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Wrapper placed around every highlighted span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markup {
    pub open: String,
    pub close: String,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            open: r#"<mark class="search-highlight">"#.to_string(),
            close: "</mark>".to_string(),
        }
    }
}

/// Regex source for one query term.
///
/// The term is folded through the table, then each char with variants
/// becomes a class holding the base, its uppercase mirror and all their
/// variants. Everything else is escaped literally. The pattern is meant to be
/// compiled case-insensitively.
pub fn term_pattern_in(table: &DiacriticTable, term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() * 4);
    for ch in table.fold(term).chars() {
        let mut class = vec![ch];
        class.extend_from_slice(table.variants_of(ch));
        let mut has_variants = class.len() > 1;
        for upper in ch.to_uppercase() {
            let upper_variants = table.variants_of(upper);
            has_variants |= !upper_variants.is_empty();
            if upper != ch {
                class.push(upper);
            }
            class.extend_from_slice(upper_variants);
        }

        if !has_variants {
            pattern.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4])));
            continue;
        }

        class.dedup();
        pattern.push('[');
        for c in class {
            pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
        }
        pattern.push(']');
    }
    pattern
}

/// [`term_pattern_in`] with the default table.
pub fn term_pattern(term: &str) -> String {
    term_pattern_in(&DEFAULT_TABLE, term)
}

fn term_spans(table: &DiacriticTable, text: &str, term: &str, spans: &mut Vec<Span>) -> Result<()> {
    let re = RegexBuilder::new(&term_pattern_in(table, term))
        .case_insensitive(true)
        .build()?;
    spans.extend(
        re.find_iter(text)
            .filter(|m| m.start() < m.end())
            .map(|m| Span::new(m.start(), m.end())),
    );
    Ok(())
}

/// Sort spans and merge any that overlap or touch.
pub fn merge_spans(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_unstable();
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

pub(crate) fn spans_in(table: &DiacriticTable, text: Input<'_>, query: Input<'_>) -> Vec<Span> {
    let (Some(text), Some(query)) = (text.present(), query.present()) else {
        return Vec::new();
    };

    let mut spans = Vec::new();
    for term in query.split_whitespace() {
        if let Err(e) = term_spans(table, text, term, &mut spans) {
            warn!(term, error = %e, "skipping highlight term");
        }
    }

    let merged = merge_spans(spans);
    debug!(spans = merged.len(), "highlight spans collected");
    merged
}

/// Copy `text`, wrapping each (sorted, disjoint) span in `markup`.
///
/// Spans that run past the text, split a UTF-8 sequence, or start before
/// the end of the previous span are skipped.
pub fn wrap_spans(text: &str, spans: &[Span], markup: &Markup) -> String {
    let extra = spans.len() * (markup.open.len() + markup.close.len());
    let mut out = String::with_capacity(text.len() + extra);
    let mut cursor = 0;
    for span in spans {
        let valid = cursor <= span.start
            && span.start <= span.end
            && text.is_char_boundary(span.start)
            && text.is_char_boundary(span.end);
        if !valid {
            debug!(start = span.start, end = span.end, "skipping invalid span");
            continue;
        }
        out.push_str(&text[cursor..span.start]);
        out.push_str(&markup.open);
        out.push_str(&text[span.start..span.end]);
        out.push_str(&markup.close);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

pub(crate) fn highlight_in(
    table: &DiacriticTable,
    markup: &Markup,
    text: Input<'_>,
    query: Input<'_>,
) -> String {
    let spans = spans_in(table, text, query);
    if spans.is_empty() {
        return text.as_str().to_string();
    }
    wrap_spans(text.as_str(), &spans, markup)
}

/// Merged match spans of every whitespace-separated query term.
pub fn highlight_spans<'a, 'b>(text: impl Into<Input<'a>>, query: impl Into<Input<'b>>) -> Vec<Span> {
    spans_in(&DEFAULT_TABLE, text.into(), query.into())
}

/// Wrap every diacritic-tolerant occurrence of the query terms in `<mark>`.
///
/// Returns `text` unchanged when nothing matches or either input is
/// absent/empty.
pub fn highlight<'a, 'b>(text: impl Into<Input<'a>>, query: impl Into<Input<'b>>) -> String {
    highlight_in(&DEFAULT_TABLE, &Markup::default(), text.into(), query.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: &str = r#"<mark class="search-highlight">"#;

    fn marked(s: &str) -> String {
        format!("{}{}</mark>", OPEN, s)
    }

    #[test]
    fn test_term_pattern_classes() {
        assert_eq!(term_pattern("sz"), "[sşSŞ]z");
        assert_eq!(term_pattern("a.b"), r"[aâàáäAÂÀÁÄ]\.b");
    }

    #[test]
    fn test_term_pattern_folds_query_diacritics() {
        assert_eq!(term_pattern("ş"), term_pattern("s"));
        assert_eq!(term_pattern("İ"), term_pattern("i"));
    }

    #[test]
    fn test_highlight_dervis() {
        let out = highlight("Dervişler sohbet ediyordu", "dervis");
        assert_eq!(out, format!("{}ler sohbet ediyordu", marked("Derviş")));
    }

    #[test]
    fn test_highlight_spans_are_byte_ranges() {
        let spans = highlight_spans("Dervişler sohbet ediyordu", "dervis");
        assert_eq!(spans, vec![Span::new(0, "Derviş".len())]);
    }

    #[test]
    fn test_highlight_multiple_terms_and_occurrences() {
        let out = highlight("zikir ve Zikirhane", "zikir");
        assert_eq!(out, format!("{} ve {}hane", marked("zikir"), marked("Zikir")));
    }

    #[test]
    fn test_highlight_overlapping_terms_merge() {
        let out = highlight("muhabbet", "muhab habbet");
        assert_eq!(out, marked("muhabbet"));
    }

    #[test]
    fn test_highlight_adjacent_terms_merge() {
        let out = highlight("derviş", "der vis");
        assert_eq!(out, marked("derviş"));
    }

    #[test]
    fn test_highlight_escapes_metacharacters() {
        assert_eq!(highlight("axb", "a.b"), "axb");
        assert_eq!(highlight("a.b", "a.b"), marked("a.b"));
        assert_eq!(highlight("(x)", "(x"), format!("{})", marked("(x")));
    }

    #[test]
    fn test_highlight_no_match_or_empty_returns_text() {
        assert_eq!(highlight("sohbet", "zikir"), "sohbet");
        assert_eq!(highlight("sohbet", ""), "sohbet");
        assert_eq!(highlight("sohbet", "   "), "sohbet");
        assert_eq!(highlight("", "zikir"), "");
        assert_eq!(highlight(None::<&str>, "zikir"), "");
    }

    #[test]
    fn test_merge_spans() {
        let spans = vec![Span::new(5, 8), Span::new(0, 2), Span::new(1, 3), Span::new(3, 4)];
        assert_eq!(merge_spans(spans), vec![Span::new(0, 4), Span::new(5, 8)]);
    }

    #[test]
    fn test_wrap_spans_custom_markup() {
        let markup = Markup {
            open: "[".into(),
            close: "]".into(),
        };
        let out = wrap_spans("abcdef", &[Span::new(1, 2), Span::new(4, 6)], &markup);
        assert_eq!(out, "a[b]cd[ef]");
    }

    #[test]
    fn test_wrap_spans_skips_invalid_spans() {
        let markup = Markup {
            open: "[".into(),
            close: "]".into(),
        };
        // inside the two bytes of 'ş'
        assert_eq!(wrap_spans("ş", &[Span::new(1, 2)], &markup), "ş");
        // past the end
        assert_eq!(wrap_spans("abc", &[Span::new(2, 9)], &markup), "abc");
        // reversed
        assert_eq!(wrap_spans("abc", &[Span::new(2, 1)], &markup), "abc");
        // unsorted: the second span starts before the first one ended
        let out = wrap_spans("abcdef", &[Span::new(3, 5), Span::new(0, 2), Span::new(5, 6)], &markup);
        assert_eq!(out, "abc[de][f]");
    }
}
