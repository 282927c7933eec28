//! Diacritic normalization
//!
//! `normalize` is the display-safe projection (case preserved), `fold` is the
//! comparison form used by the matcher (normalized, then lowercased).

use crate::table::DiacriticTable;

impl DiacriticTable {
    /// Replace every known variant with its base letter.
    ///
    /// Single left-to-right scan; unmapped chars (including combining marks)
    /// pass through verbatim.
    pub fn normalize(&self, text: &str) -> String {
        text.chars().map(|c| self.base_of(c).unwrap_or(c)).collect()
    }

    /// Comparison form: per char, normalize through the table and then
    /// lowercase.
    ///
    /// Normalizing first keeps `İ` a single char (`İ -> I -> i`) instead of
    /// the `i` + U+0307 that `char::to_lowercase` produces.
    pub fn fold(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            let base = self.base_of(c).unwrap_or(c);
            for lower in base.to_lowercase() {
                out.push(self.base_of(lower).unwrap_or(lower));
            }
        }
        out
    }
}

/// Normalize with the default Turkish table.
pub fn normalize(text: &str) -> String {
    crate::DEFAULT_TABLE.normalize(text)
}

/// Fold with the default Turkish table.
pub fn fold(text: &str) -> String {
    crate::DEFAULT_TABLE.fold(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_turkish_letters() {
        assert_eq!(normalize("füyûzât"), "fuyuzat");
        assert_eq!(normalize("çğıöşü"), "cgiosu");
        assert_eq!(normalize("ÇĞÖŞÜ"), "CGOSU");
    }

    #[test]
    fn test_normalize_unmapped_passthrough() {
        assert_eq!(normalize("RABITA"), "RABITA");
        assert_eq!(normalize("ñ ß 東京"), "ñ ß 東京");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_dotted_capital_i() {
        assert_eq!(normalize("İstanbul"), "Istanbul");
        let strict = DiacriticTable::turkish().without_variant('İ');
        assert_eq!(strict.normalize("İstanbul"), "İstanbul");
    }

    #[test]
    fn test_normalize_combining_marks_untouched() {
        // "u" + U+0308 COMBINING DIAERESIS is not precomposed
        let decomposed = "u\u{0308}";
        assert_eq!(normalize(decomposed), decomposed);
    }

    #[test]
    fn test_normalize_idempotent() {
        for s in ["füyûzât", "İstanbul", "Dervişler", "ŞEMSÎ", "abc", ""] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_fold_lowercases_after_normalizing() {
        assert_eq!(fold("FÜYÛZÂT"), "fuyuzat");
        assert_eq!(fold("İstanbul"), "istanbul");
        assert_eq!(fold("IŞIK"), "isik");
    }
}
