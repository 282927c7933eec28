//! Edit distance and similarity ratio
//!
//! Lengths and distances are counted in chars, never bytes.

use strsim::levenshtein;

/// Unit-cost Levenshtein distance (insert, delete, substitute) over chars.
#[inline]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    levenshtein(a, b)
}

/// Length-relative similarity in `[0.0, 1.0]`.
///
/// `(len(longer) - distance) / len(longer)`, where ties in length keep `a` as
/// the longer string. Two empty strings are identical (`1.0`).
pub fn similarity(a: &str, b: &str) -> f64 {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let (longer, shorter, longer_len) = if a_len >= b_len {
        (a, b, a_len)
    } else {
        (b, a, b_len)
    };

    if longer_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(longer, shorter);
    (longer_len - distance) as f64 / longer_len as f64
}
