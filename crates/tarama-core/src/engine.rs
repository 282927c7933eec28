//! SearchEngine - configured entry point for all operations

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{multi_search_in, word_frequency_in};
use crate::config::EngineConfig;
use crate::distance::similarity;
use crate::error::Result;
use crate::highlight::{highlight_in, spans_in, term_pattern_in, Span};
use crate::input::Input;
use crate::matcher::{contains_in, fuzzy_score_in};
use crate::table::DiacriticTable;

/// A ranked candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub value: String,
    pub score: f64,
}

impl ScoredMatch {
    fn new(value: String, score: f64) -> Self {
        Self { value, score }
    }
}

/// Immutable engine: a diacritic table plus configuration.
///
/// Holds no mutable state, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    table: DiacriticTable,
    config: EngineConfig,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    /// Create a SearchEngine with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create with custom configuration; the table is built from its
    /// overrides.
    ///
    /// The config is taken as-is. Use [`SearchEngine::try_with_config`] for
    /// configs that did not come through [`EngineConfig::from_json`].
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            table: config.table.build(),
            config,
        }
    }

    /// Validate `config`, then build the engine from it.
    pub fn try_with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Replace the diacritic table outright.
    pub fn with_table(mut self, table: DiacriticTable) -> Self {
        self.table = table;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn table(&self) -> &DiacriticTable {
        &self.table
    }

    pub fn normalize(&self, text: &str) -> String {
        self.table.normalize(text)
    }

    pub fn fold(&self, text: &str) -> String {
        self.table.fold(text)
    }

    pub fn contains_normalized<'a, 'b>(
        &self,
        text: impl Into<Input<'a>>,
        term: impl Into<Input<'b>>,
    ) -> bool {
        contains_in(&self.table, text.into(), term.into())
    }

    pub fn fuzzy_score<'a, 'b>(
        &self,
        text: impl Into<Input<'a>>,
        term: impl Into<Input<'b>>,
    ) -> Option<f64> {
        fuzzy_score_in(&self.table, text.into(), term.into())
    }

    /// Fuzzy match at the configured threshold.
    pub fn fuzzy_match<'a, 'b>(&self, text: impl Into<Input<'a>>, term: impl Into<Input<'b>>) -> bool {
        self.fuzzy_match_at(text, term, self.config.threshold)
    }

    pub fn fuzzy_match_at<'a, 'b>(
        &self,
        text: impl Into<Input<'a>>,
        term: impl Into<Input<'b>>,
        threshold: f64,
    ) -> bool {
        self.fuzzy_score(text, term)
            .is_some_and(|score| score >= threshold)
    }

    pub fn term_pattern(&self, term: &str) -> String {
        term_pattern_in(&self.table, term)
    }

    pub fn highlight_spans<'a, 'b>(
        &self,
        text: impl Into<Input<'a>>,
        query: impl Into<Input<'b>>,
    ) -> Vec<Span> {
        spans_in(&self.table, text.into(), query.into())
    }

    /// Highlight with the configured markup.
    pub fn highlight<'a, 'b>(&self, text: impl Into<Input<'a>>, query: impl Into<Input<'b>>) -> String {
        highlight_in(&self.table, &self.config.markup, text.into(), query.into())
    }

    pub fn multi_search<'a, S: AsRef<str>>(&self, text: impl Into<Input<'a>>, terms: &[S]) -> bool {
        multi_search_in(&self.table, text.into(), terms)
    }

    pub fn word_frequency<'a, 'b>(
        &self,
        text: impl Into<Input<'a>>,
        term: impl Into<Input<'b>>,
    ) -> usize {
        word_frequency_in(&self.table, text.into(), term.into())
    }

    /// Score every candidate against `query`, keep those at or above the
    /// configured threshold, best first.
    ///
    /// Candidates are trimmed before scoring, like the query; blank ones are
    /// skipped. Matches keep the candidate as given. Ties are ordered by
    /// value for stability. At most `max_results` are returned.
    pub fn rank<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Vec<ScoredMatch> {
        let query = self.table.fold(query.trim());
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<ScoredMatch> = candidates
            .iter()
            .map(|candidate| candidate.as_ref())
            .filter(|candidate: &&str| !candidate.trim().is_empty())
            .map(|candidate| {
                let score = similarity(&self.table.fold(candidate.trim()), &query);
                ScoredMatch::new(candidate.to_string(), score)
            })
            .filter(|m| m.score >= self.config.threshold)
            .collect();

        // Sort by score descending, then by value for stability
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.value.cmp(&b.value))
        });

        matches.truncate(self.config.max_results);
        debug!(candidates = candidates.len(), kept = matches.len(), "ranked candidates");
        matches
    }
}
