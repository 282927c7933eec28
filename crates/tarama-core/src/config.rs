//! Engine configuration
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! {
//!   "threshold": 0.8,
//!   "markup": { "open": "<b>", "close": "</b>" },
//!   "table": { "remove": ["İ"] }
//! }
//! ```
//!
//! Environment overrides:
//! - `TARAMA_THRESHOLD`: fuzzy acceptance threshold (default: 0.7)
//! - `TARAMA_MAX_RESULTS`: ranking result cap (default: 20)

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::highlight::Markup;
use crate::matcher::DEFAULT_THRESHOLD;
use crate::table::{DiacriticTable, VariantEntry};

pub const ENV_THRESHOLD: &str = "TARAMA_THRESHOLD";
pub const ENV_MAX_RESULTS: &str = "TARAMA_MAX_RESULTS";

/// Edits applied on top of the default Turkish table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOverrides {
    pub add: Vec<VariantEntry>,
    pub remove: Vec<char>,
}

impl TableOverrides {
    /// Build the effective table: removals first, then additions.
    pub fn build(&self) -> DiacriticTable {
        let mut table = DiacriticTable::turkish();
        for &variant in &self.remove {
            table = table.without_variant(variant);
        }
        for entry in &self.add {
            table = table.with_variant(entry.base, entry.variant);
        }
        table
    }

    /// Reject additions that would chain through another mapping: a base
    /// that is itself a variant, or a variant that is already a base with
    /// variants of its own.
    pub fn check(&self) -> Result<()> {
        let mut table = DiacriticTable::turkish();
        for &variant in &self.remove {
            table = table.without_variant(variant);
        }
        for entry in &self.add {
            if let Some(root) = table.base_of(entry.base) {
                return Err(Error::Config(format!(
                    "table.add base '{}' is itself a variant of '{}'",
                    entry.base, root
                )));
            }
            if !table.variants_of(entry.variant).is_empty() {
                return Err(Error::Config(format!(
                    "table.add variant '{}' is a base letter with its own variants",
                    entry.variant
                )));
            }
            table = table.with_variant(entry.base, entry.variant);
        }
        Ok(())
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fuzzy acceptance threshold, nominally 0.0-1.0 (not clamped)
    pub threshold: f64,
    /// Maximum results returned by ranking
    pub max_results: usize,
    /// Highlight wrapper
    pub markup: Markup,
    /// Diacritic table edits
    pub table: TableOverrides,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_results: 20,
            markup: Markup::default(),
            table: TableOverrides::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Apply `TARAMA_*` environment overrides.
    pub fn apply_env(self) -> Self {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Unparsable values are logged and ignored.
    pub fn apply_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(ENV_THRESHOLD) {
            match raw.trim().parse::<f64>() {
                Ok(threshold) if !threshold.is_nan() => self.threshold = threshold,
                _ => warn!(var = ENV_THRESHOLD, value = %raw, "ignoring unparsable override"),
            }
        }
        if let Some(raw) = lookup(ENV_MAX_RESULTS) {
            match raw.trim().parse::<usize>() {
                Ok(max) => self.max_results = max,
                Err(_) => warn!(var = ENV_MAX_RESULTS, value = %raw, "ignoring unparsable override"),
            }
        }
        self.warn_degenerate();
        self
    }

    /// Reject configs the engine cannot render with.
    pub fn validate(&self) -> Result<()> {
        if self.markup.open.is_empty() {
            return Err(Error::Config("markup.open must not be empty".into()));
        }
        if self.threshold.is_nan() {
            return Err(Error::Config("threshold must be a number".into()));
        }
        self.table.check()?;
        self.warn_degenerate();
        Ok(())
    }

    fn warn_degenerate(&self) {
        if !(0.0..=1.0).contains(&self.threshold) {
            warn!(
                threshold = self.threshold,
                "threshold outside [0, 1]; fuzzy matching will accept everything or nothing"
            );
        }
    }
}
