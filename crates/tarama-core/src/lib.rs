//! Tarama Core Engine
//!
//! Turkish-diacritic-aware text matching: answers "does this text contain or
//! resemble this query" across orthographic variants such as `füyûzât`,
//! `fuyuzat` and `füyüzat`, ranks approximate matches, and highlights query
//! terms in the original text. Runs identically in browser (WASM) and native
//! environments; every operation is a pure function of its inputs.
//!
//! # Example
//!
//! ```rust
//! use tarama_core::{contains_normalized, fuzzy_match, highlight, normalize};
//!
//! assert_eq!(normalize("füyûzât"), "fuyuzat");
//! assert!(contains_normalized("füyûzât kitabı", "fuyuzat"));
//! assert!(fuzzy_match("zikir", "zikr", 0.7));
//!
//! let html = highlight("Dervişler sohbet ediyordu", "dervis");
//! assert!(html.starts_with(r#"<mark class="search-highlight">Derviş</mark>"#));
//! ```
//!
//! The free functions use the default Turkish table and configuration. Use
//! [`SearchEngine`] for a custom threshold, markup or table.

pub mod aggregate;
pub mod config;
pub mod distance;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod input;
pub mod matcher;
pub mod normalize;
pub mod table;

use lazy_static::lazy_static;

lazy_static! {
    /// Shared default table backing the free functions.
    pub static ref DEFAULT_TABLE: table::DiacriticTable = table::DiacriticTable::turkish();
}

// Re-export main types at crate root
pub use aggregate::{multi_search, word_frequency};
pub use config::{EngineConfig, TableOverrides};
pub use distance::{levenshtein_distance, similarity};
pub use engine::{ScoredMatch, SearchEngine};
pub use error::{Error, Result};
pub use highlight::{highlight, highlight_spans, merge_spans, term_pattern, wrap_spans, Markup, Span};
pub use input::Input;
pub use matcher::{
    contains_normalized, fuzzy_match, fuzzy_match_default, fuzzy_score, DEFAULT_THRESHOLD,
};
pub use normalize::{fold, normalize};
pub use table::{DiacriticTable, VariantEntry};
