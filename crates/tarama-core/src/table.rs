//! Canonical diacritic equivalence table
//!
//! Every other component derives its behaviour from this table: the
//! normalizer maps each variant back to its base letter, and the highlighter
//! expands each base letter into a character class of its variants. Keeping
//! a single table means the two directions cannot drift apart.
//!
//! Entries are case-sensitive. Lowercase variants belong to a lowercase base
//! and uppercase variants to an uppercase base, so normalization preserves
//! case.

use std::collections::HashMap;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

/// Lowercase Turkish / Latin-extended variants per base letter.
const TURKISH_LOWER: &[(char, &[char])] = &[
    ('a', &['â', 'à', 'á', 'ä']),
    ('c', &['ç']),
    ('e', &['ê', 'è', 'é', 'ë']),
    ('g', &['ğ']),
    ('i', &['ı', 'î', 'ì', 'í', 'ï']),
    ('o', &['ö', 'ô', 'ò', 'ó', 'ő']),
    ('s', &['ş']),
    ('u', &['ü', 'û', 'ù', 'ú', 'ű']),
];

/// Uppercase mirror of [`TURKISH_LOWER`].
///
/// `İ` (dotted capital I) folds to plain `I` here. Turkish pairs `İ`/`i` and
/// `I`/`ı`, so this conflates them; the entry is removable through
/// [`DiacriticTable::without_variant`].
const TURKISH_UPPER: &[(char, &[char])] = &[
    ('A', &['Â', 'À', 'Á', 'Ä']),
    ('C', &['Ç']),
    ('E', &['Ê', 'È', 'É', 'Ë']),
    ('G', &['Ğ']),
    ('I', &['İ', 'Î', 'Ì', 'Í', 'Ï']),
    ('O', &['Ö', 'Ô', 'Ò', 'Ó', 'Ő']),
    ('S', &['Ş']),
    ('U', &['Ü', 'Û', 'Ù', 'Ú', 'Ű']),
];

/// One `base -> variant` pair, used by config overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantEntry {
    pub base: char,
    pub variant: char,
}

/// Data-driven `base letter -> variants` table.
#[derive(Debug, Clone)]
pub struct DiacriticTable {
    /// Base letters in insertion order, each with its variants.
    entries: Vec<(char, Vec<char>)>,
    /// Reverse lookup `variant -> base`, rebuilt on every edit.
    reverse: HashMap<char, char, RandomState>,
}

impl Default for DiacriticTable {
    fn default() -> Self {
        Self::turkish()
    }
}

impl DiacriticTable {
    /// Empty table: normalization becomes the identity.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            reverse: HashMap::with_hasher(RandomState::new()),
        }
    }

    /// The canonical Turkish / Latin-extended table.
    pub fn turkish() -> Self {
        let mut table = Self::empty();
        for (base, variants) in TURKISH_LOWER.iter().chain(TURKISH_UPPER) {
            for &variant in variants.iter() {
                table.insert(*base, variant);
            }
        }
        table
    }

    /// Add (or move) `variant` under `base`.
    pub fn with_variant(mut self, base: char, variant: char) -> Self {
        self.insert(base, variant);
        self
    }

    /// Drop `variant` from the table so it passes through unchanged.
    pub fn without_variant(mut self, variant: char) -> Self {
        self.remove(variant);
        self
    }

    /// Every variant maps straight to a root base (a char that is not itself
    /// a variant), which keeps normalization idempotent.
    fn insert(&mut self, base: char, variant: char) {
        let base = self.base_of(base).unwrap_or(base);
        if base == variant {
            return;
        }
        // A char can only fold to one base.
        self.remove(variant);

        // `variant` was a base: its own variants move under the new root.
        let mut moved = vec![variant];
        if let Some(pos) = self.entries.iter().position(|(b, _)| *b == variant) {
            moved.extend(self.entries.remove(pos).1);
        }

        for &v in &moved {
            self.reverse.insert(v, base);
        }
        match self.entries.iter_mut().find(|(b, _)| *b == base) {
            Some((_, variants)) => variants.extend(moved),
            None => self.entries.push((base, moved)),
        }
    }

    fn remove(&mut self, variant: char) {
        if let Some(base) = self.reverse.remove(&variant) {
            if let Some((_, variants)) = self.entries.iter_mut().find(|(b, _)| *b == base) {
                variants.retain(|&v| v != variant);
            }
            self.entries.retain(|(_, variants)| !variants.is_empty());
        }
    }

    /// Base letter for `c`, if `c` is a known variant.
    #[inline]
    pub fn base_of(&self, c: char) -> Option<char> {
        self.reverse.get(&c).copied()
    }

    /// Variants registered under `base` (empty slice if none).
    pub fn variants_of(&self, base: char) -> &[char] {
        self.entries
            .iter()
            .find(|(b, _)| *b == base)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    /// Base letters that have at least one variant.
    pub fn bases(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.iter().map(|(b, _)| *b)
    }

    /// Number of variant entries.
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }
}
